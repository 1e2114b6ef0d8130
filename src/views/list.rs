use super::{Flag, Screen};
use crate::api::CountrySource;
use crate::loader::{FetchFn, Loader};
use crate::models::CountrySummary;
use crate::resource::LoadState;
use crate::route::Route;
use std::sync::Arc;
use std::time::Duration;

pub const LIST_HEADING: &str = "Countries";
pub const LIST_LOADING: &str = "Loading countries...";
pub const LIST_ERROR: &str = "Failed to load countries";
pub const LIST_EMPTY: &str = "No countries available.";

/// One entry on the landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryCard {
    pub code: String,
    pub name: String,
    pub flag: Flag,
    pub route: Route,
}

impl From<&CountrySummary> for CountryCard {
    fn from(c: &CountrySummary) -> Self {
        Self {
            code: c.code.clone(),
            name: c.name.clone(),
            flag: Flag::for_country(&c.name, c.flag_url.as_deref()),
            route: Route::country(&c.code),
        }
    }
}

/// The landing page: every available country.
pub struct ListView {
    loader: Loader<(), Vec<CountrySummary>>,
}

impl ListView {
    /// Mount the view; the fetch starts immediately.
    pub fn open(source: Arc<dyn CountrySource>) -> Self {
        let fetch: FetchFn<(), Vec<CountrySummary>> = Arc::new(move |_: &()| source.list_countries());
        Self {
            loader: Loader::start((), fetch),
        }
    }

    pub fn state(&self) -> &LoadState<Vec<CountrySummary>> {
        self.loader.state()
    }

    pub fn poll(&mut self) -> bool {
        self.loader.poll()
    }

    pub fn wait(&mut self, timeout: Duration) -> bool {
        self.loader.wait(timeout)
    }

    pub fn retry(&mut self) -> bool {
        self.loader.retry()
    }

    pub fn screen(&self) -> Screen<Vec<CountryCard>> {
        match self.state() {
            LoadState::Loading => Screen::Loading {
                message: LIST_LOADING,
            },
            LoadState::ErrorNetwork(e) => Screen::Error {
                message: LIST_ERROR,
                detail: e.to_string(),
                retry: true,
            },
            LoadState::ErrorEmpty => Screen::Empty {
                message: LIST_EMPTY,
            },
            LoadState::Success(countries) => {
                Screen::Ready(countries.iter().map(CountryCard::from).collect())
            }
        }
    }
}
