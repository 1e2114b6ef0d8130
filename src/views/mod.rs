//! View models for the list page and the detail page.
//!
//! Views own a [`Loader`](crate::loader::Loader) and turn its state into a
//! [`Screen`]: a plain description of what to show that the CLI prints and the
//! GUI paints. Nothing here does I/O except through the injected
//! [`CountrySource`](crate::api::CountrySource).

pub mod borders;
pub mod detail;
pub mod list;
pub mod text;

pub use borders::{BorderLink, BorderPanel};
pub use detail::{DetailPage, DetailScreen, DetailView};
pub use list::{CountryCard, ListView};

pub const FLAG_UNAVAILABLE: &str = "Flag Unavailable";

/// What one view shows for its current state.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<C> {
    Loading {
        message: &'static str,
    },
    /// Network failure; `retry` is always offered here.
    Error {
        message: &'static str,
        detail: String,
        retry: bool,
    },
    /// Request succeeded but nothing came back. No retry.
    Empty {
        message: &'static str,
    },
    Ready(C),
}

impl<C> Screen<C> {
    pub fn offers_retry(&self) -> bool {
        matches!(self, Screen::Error { retry: true, .. })
    }

    pub fn content(&self) -> Option<&C> {
        match self {
            Screen::Ready(c) => Some(c),
            _ => None,
        }
    }
}

/// A flag image reference, or the placeholder when the record has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    Image { url: String, alt: String },
    Missing,
}

impl Flag {
    pub fn for_country(name: &str, url: Option<&str>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => Flag::Image {
                url: url.to_string(),
                alt: format!("Flag of {name}"),
            },
            _ => Flag::Missing,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Flag::Image { url, .. } => Some(url),
            Flag::Missing => None,
        }
    }
}
