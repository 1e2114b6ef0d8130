use super::Flag;
use crate::models::BorderReference;
use crate::route::Route;

pub const BORDERS_HEADING: &str = "Border Countries";
pub const NO_BORDERS_MESSAGE: &str = "No bordering countries found.";
pub const NO_BORDERS_NOTE: &str =
    "This could be due to incomplete data or geographic isolation.";

/// One clickable neighbour.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderLink {
    pub code: String,
    pub name: String,
    pub flag: Flag,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BorderPanel {
    Empty,
    Grid(Vec<BorderLink>),
}

impl BorderPanel {
    pub fn from_borders(borders: &[BorderReference]) -> Self {
        if borders.is_empty() {
            return BorderPanel::Empty;
        }
        BorderPanel::Grid(
            borders
                .iter()
                .map(|b| BorderLink {
                    code: b.code.clone(),
                    name: b.name.clone(),
                    flag: Flag::for_country(&b.name, b.flag_url.as_deref()),
                    route: Route::country(&b.code),
                })
                .collect(),
        )
    }

    /// Links to render; always empty for the empty state.
    pub fn links(&self) -> &[BorderLink] {
        match self {
            BorderPanel::Empty => &[],
            BorderPanel::Grid(links) => links,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BorderPanel::Empty)
    }
}
