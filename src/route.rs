//! Client-side routes: `/` for the list and `/country/{code}` for a detail page.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    /// The code is kept exactly as it appeared in the path.
    Country(String),
}

impl Route {
    /// Parse a path. A query string or fragment is ignored; unknown paths give `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_start_matches('/');
        if trimmed.is_empty() {
            return Some(Route::List);
        }
        match trimmed.split_once('/') {
            Some(("country", code)) => {
                let code = code.strip_suffix('/').unwrap_or(code);
                if code.is_empty() || code.contains('/') {
                    None
                } else {
                    Some(Route::Country(code.to_string()))
                }
            }
            _ => None,
        }
    }

    pub fn country(code: &str) -> Route {
        Route::Country(code.to_string())
    }

    pub fn href(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::Country(code) => write!(f, "/country/{code}"),
        }
    }
}
