//! country_explorer
//!
//! A small Rust library for browsing a country REST API: list every country,
//! open one to see its flag, population history, and neighbours. Pairs with the
//! `country-explorer` CLI and the `country-explorer-gui` desktop app.
//!
//! ### Features
//! - Blocking client for `/countries` and `/countries/{code}` with structured errors
//! - One loading state machine (loading / network error / empty / success) shared
//!   by the list and detail views, with manual retry and stale-response protection
//! - Population chart model with K/M/B labels and data-quality placeholders,
//!   rendered to SVG
//! - CSV/JSON export of a loaded country
//!
//! ### Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use country_explorer::{Client, Config};
//! use country_explorer::views::{DetailView, text};
//!
//! let client = Arc::new(Client::new(&Config::load(None)?)?);
//! let mut view = DetailView::open(client, "DE");
//! view.wait(Duration::from_secs(30));
//! print!("{}", text::render_detail(&view.screen(), country_explorer::viz::map_locale("en")));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod loader;
pub mod models;
pub mod resource;
pub mod route;
pub mod storage;
pub mod views;
pub mod viz;

pub use api::{ApiError, Client, CountrySource};
pub use config::Config;
pub use models::{BorderReference, CountryDetail, CountrySummary, PopulationSample};
pub use resource::LoadState;
pub use route::Route;
