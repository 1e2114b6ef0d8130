use super::borders::BorderPanel;
use super::{Flag, Screen};
use crate::api::CountrySource;
use crate::loader::{FetchFn, Loader};
use crate::models::CountryDetail;
use crate::resource::LoadState;
use crate::route::Route;
use crate::viz::PopulationChart;
use std::sync::Arc;
use std::time::Duration;

pub const DETAIL_LOADING: &str = "Loading country information...";
pub const DETAIL_ERROR: &str = "Failed to load country information";
pub const DETAIL_NOT_FOUND: &str = "Country not found.";
pub const CHART_HEADING: &str = "Population Over Time";
pub const BACK_LINK: &str = "Back to country list";

/// Everything the detail page shows once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub code: String,
    pub name: String,
    pub flag: Flag,
    pub chart: PopulationChart,
    pub borders: BorderPanel,
}

impl From<&CountryDetail> for DetailPage {
    fn from(d: &CountryDetail) -> Self {
        Self {
            code: d.code.clone(),
            name: d.name.clone(),
            flag: Flag::for_country(&d.name, d.flag_url.as_deref()),
            chart: PopulationChart::from_samples(&d.population),
            borders: BorderPanel::from_borders(&d.borders),
        }
    }
}

/// A detail screen, tagged with the code it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailScreen {
    pub code: String,
    pub body: Screen<DetailPage>,
}

impl DetailScreen {
    /// Every detail state links back to the list.
    pub fn back(&self) -> Route {
        Route::List
    }
}

/// The per-country page. Following a border re-uses the same view through
/// [`DetailView::navigate`].
pub struct DetailView {
    loader: Loader<String, Option<CountryDetail>>,
}

impl DetailView {
    pub fn open(source: Arc<dyn CountrySource>, code: &str) -> Self {
        let fetch: FetchFn<String, Option<CountryDetail>> =
            Arc::new(move |code: &String| source.get_country_detail(code));
        Self {
            loader: Loader::start(code.to_string(), fetch),
        }
    }

    pub fn code(&self) -> &str {
        self.loader.key()
    }

    pub fn state(&self) -> &LoadState<CountryDetail> {
        self.loader.state()
    }

    /// Switch to another country. The previous page is dropped at once and a
    /// late response for it is ignored.
    pub fn navigate(&mut self, code: &str) {
        self.loader.navigate(code.to_string());
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

    pub fn screen(&self) -> DetailScreen {
        let body = match self.state() {
            LoadState::Loading => Screen::Loading {
                message: DETAIL_LOADING,
            },
            LoadState::ErrorNetwork(e) => Screen::Error {
                message: DETAIL_ERROR,
                detail: e.to_string(),
                retry: true,
            },
            LoadState::ErrorEmpty => Screen::Empty {
                message: DETAIL_NOT_FOUND,
            },
            LoadState::Success(detail) => Screen::Ready(DetailPage::from(detail)),
        };
        DetailScreen {
            code: self.code().to_string(),
            body,
        }
    }
}
