//! Synchronous client for the **country REST API**.
//!
//! Two read-only endpoints are wrapped:
//! - `GET {API_BASE}/countries` → every available country
//! - `GET {API_BASE}/countries/{code}` → one country with borders and population
//!
//! ### Notes
//! - There is no retry or backoff here. Retrying is a user action handled by the views.
//! - A non-2xx response becomes an [`ApiError`] carrying the status and the body text
//!   (or `"API call failed: <reason>"` when the body is empty).
//! - A detail body of `null` (or an empty body) means the record is absent; that is
//!   returned as `Ok(None)`, not as an error.
//!
//! Typical usage:
//! ```no_run
//! # use country_explorer::{Client, Config, CountrySource};
//! let client = Client::new(&Config::new("http://localhost:8000")?)?;
//! let countries = client.list_countries()?;
//! let detail = client.get_country_detail("DE")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::config::Config;
use crate::models::{CountryDetail, CountrySummary};
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;

/// Structured failure of one API call.
///
/// `status` is `None` when no HTTP response was received at all (DNS, refused
/// connection, timeout).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("GET {endpoint} failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
    pub endpoint: String,
}

impl ApiError {
    fn transport(endpoint: &str, err: &reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

/// Anything that can answer the two country queries.
///
/// The HTTP [`Client`] is the production implementation; views only depend on
/// this trait.
pub trait CountrySource: Send + Sync {
    fn list_countries(&self) -> Result<Vec<CountrySummary>, ApiError>;
    fn get_country_detail(&self, code: &str) -> Result<Option<CountryDetail>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

// Keep -, _, . and ~ unescaped (RFC 3986 unreserved); everything else is encoded
// so a code always stays one path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn enc_segment(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, SEGMENT).to_string()
}

impl Client {
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout) // None = wait as long as the server does
            .redirect(Policy::limited(5))
            .user_agent(concat!("country_explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            base_url: config.api_base.clone(),
            http,
        })
    }

    /// Perform one GET and return the successful body text.
    fn get_text(&self, endpoint: &str) -> Result<(u16, String), ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("GET {url}");

        let resp = self.http.get(&url).send().map_err(|e| {
            log::warn!("GET {url}: {e}");
            ApiError::transport(endpoint, &e)
        })?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!(
                    "API call failed: {}",
                    status.canonical_reason().unwrap_or("unknown status")
                )
            } else {
                body
            };
            log::warn!("GET {url}: HTTP {}", status.as_u16());
            return Err(ApiError {
                status: Some(status.as_u16()),
                message,
                endpoint: endpoint.to_string(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| ApiError::transport(endpoint, &e))?;
        Ok((status.as_u16(), body))
    }

    fn decode<T: DeserializeOwned>(endpoint: &str, status: u16, body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError {
            status: Some(status),
            message: format!("invalid response body: {e}"),
            endpoint: endpoint.to_string(),
        })
    }
}

impl CountrySource for Client {
    /// Fetch every available country, in the order the API returns them.
    fn list_countries(&self) -> Result<Vec<CountrySummary>, ApiError> {
        let endpoint = "/countries";
        let (status, body) = self.get_text(endpoint)?;
        Self::decode(endpoint, status, &body)
    }

    /// Fetch one country. The code is passed through as-is (only escaped to stay
    /// a single path segment); the API decides whether it exists.
    fn get_country_detail(&self, code: &str) -> Result<Option<CountryDetail>, ApiError> {
        let endpoint = format!("/countries/{}", enc_segment(code));
        let (status, body) = self.get_text(&endpoint)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Self::decode(&endpoint, status, &body)
    }
}
