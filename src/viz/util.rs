//! Utility functions for visualization: value formatting, axis ranges, label sizing.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Line color of the population series (#2563EB).
pub const SERIES_BLUE: RGBColor = RGBColor(37, 99, 235);
/// Light grid color (#F0F0F0).
pub const GRID_GRAY: RGBColor = RGBColor(240, 240, 240);

/// Compact population label: `3.2B`, `2.5M`, `1.5K`, or the plain integer below 1,000.
///
/// Suffixed forms always carry one decimal place.
pub fn format_population(value: f64) -> String {
    if value >= 1.0e9 {
        format!("{:.1}B", value / 1.0e9)
    } else if value >= 1.0e6 {
        format!("{:.1}M", value / 1.0e6)
    } else if value >= 1.0e3 {
        format!("{:.1}K", value / 1.0e3)
    } else {
        format!("{}", value.round() as i64)
    }
}

/// Full value with locale thousands separators, e.g. `83,100,000`.
pub fn format_grouped(value: f64, locale: &Locale) -> String {
    (value.round() as i64).to_formatted_string(locale)
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Year span of a sorted series, widened by one year on each side when it
/// collapses to a single year.
pub fn year_range(points: &[(i32, f64)]) -> (i32, i32) {
    let first = points.first().map(|p| p.0).unwrap_or_default();
    let last = points.last().map(|p| p.0).unwrap_or_default();
    if first == last {
        (first.saturating_sub(1), last.saturating_add(1))
    } else {
        (first, last)
    }
}

/// Value span with 5% headroom; the lower bound never drops below zero.
pub fn value_range(points: &[(i32, f64)]) -> (f64, f64) {
    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    let pad = if span.abs() < f64::EPSILON {
        max.abs() * 0.05 + 1.0
    } else {
        span * 0.05
    };
    ((min - pad).max(0.0), max + pad)
}

/// Width of the left label area (pixels) needed for the Y tick labels.
/// Clamped to a sensible range.
pub fn compute_left_label_area_px(ymin: f64, ymax: f64, ticks: usize, font_px: u32) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(estimate_text_width_px(&format_population(v), font_px));
    }
    max_px.saturating_add(18).clamp(48, 140)
}
