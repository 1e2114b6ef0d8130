use dotenvy::dotenv;
use reqwest::Url;
use std::env;
use std::time::Duration;

/// Environment variable holding the base URL of the country API.
pub const API_BASE_VAR: &str = "API_BASE";
/// Optional total request timeout in seconds. Unset means no timeout.
pub const API_TIMEOUT_VAR: &str = "API_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set (export it or add it to .env)")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Startup configuration, read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build from an explicit base URL (validated, trailing `/` removed).
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        let trimmed = api_base.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Missing(API_BASE_VAR));
        }
        let url = Url::parse(trimmed).map_err(|e| ConfigError::Invalid {
            var: API_BASE_VAR,
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                var: API_BASE_VAR,
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        Ok(Self {
            api_base: trimmed.to_string(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load `.env` (if any), then read `API_BASE` and `API_TIMEOUT_SECS`.
    /// `api_base_override` wins over the environment when given.
    pub fn load(api_base_override: Option<&str>) -> Result<Self, ConfigError> {
        dotenv().ok();

        let api_base = match api_base_override {
            Some(v) => v.to_string(),
            None => env::var(API_BASE_VAR).map_err(|_| ConfigError::Missing(API_BASE_VAR))?,
        };
        let timeout = match env::var(API_TIMEOUT_VAR) {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };
        Ok(Self::new(&api_base)?.with_timeout(timeout))
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var: API_TIMEOUT_VAR,
        reason: format!("expected whole seconds, got `{raw}`"),
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            var: API_TIMEOUT_VAR,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}
