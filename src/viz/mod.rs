//! Population chart: data-quality gating, value formatting, and rendering.
//!
//! [`PopulationChart::from_samples`] turns the raw series from a detail record
//! into either a drawable line or one of two placeholders. Rendering backends
//! (SVG via plotters, the CLI text view, the GUI painter) all start from this
//! model so they agree on what is shown.

pub mod svg;
pub mod text;
pub mod util;

pub use util::{format_grouped, format_population, map_locale};

use crate::models::PopulationSample;

pub const UNAVAILABLE_TITLE: &str = "Population Data Unavailable";
pub const UNAVAILABLE_MESSAGE: &str =
    "We could not retrieve population information for this country.";
pub const INSUFFICIENT_TITLE: &str = "Limited Population Data";
pub const INSUFFICIENT_MESSAGE: &str = "Not enough data points to create a meaningful trend.";
pub const EXCLUDED_FOOTNOTE: &str = "* Some data points were excluded due to invalid values";

/// What the population panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationChart {
    /// No valid sample at all.
    Unavailable,
    /// Exactly one valid sample; a line needs two.
    Insufficient { valid_points: usize },
    Line(PopulationSeries),
}

/// The plotted subset: valid samples only, ascending by year.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationSeries {
    points: Vec<(i32, f64)>,
    excluded: usize,
}

impl PopulationSeries {
    pub fn points(&self) -> &[(i32, f64)] {
        &self.points
    }

    /// Input samples dropped for an invalid value.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn shows_footnote(&self) -> bool {
        self.excluded > 0
    }

    pub fn year_range(&self) -> (i32, i32) {
        util::year_range(&self.points)
    }

    pub fn value_range(&self) -> (f64, f64) {
        util::value_range(&self.points)
    }

    /// Most recent plotted sample.
    pub fn latest(&self) -> Option<(i32, f64)> {
        self.points.last().copied()
    }
}

impl PopulationChart {
    pub fn from_samples(samples: &[PopulationSample]) -> Self {
        let mut valid: Vec<(i32, f64)> = samples
            .iter()
            .filter(|s| s.is_valid())
            .filter_map(|s| s.value.map(|v| (s.year, v)))
            .collect();

        match valid.len() {
            0 => return PopulationChart::Unavailable,
            1 => return PopulationChart::Insufficient { valid_points: 1 },
            _ => {}
        }

        // Stable: samples sharing a year keep their source order.
        valid.sort_by_key(|(y, _)| *y);

        let excluded = samples.len() - valid.len();
        PopulationChart::Line(PopulationSeries {
            points: valid,
            excluded,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        !matches!(self, PopulationChart::Line(_))
    }

    pub fn series(&self) -> Option<&PopulationSeries> {
        match self {
            PopulationChart::Line(s) => Some(s),
            _ => None,
        }
    }
}
