//! Plain-text rendering of screens, used by the CLI.

use super::borders::{BORDERS_HEADING, BorderPanel, NO_BORDERS_MESSAGE, NO_BORDERS_NOTE};
use super::detail::{BACK_LINK, CHART_HEADING, DetailPage, DetailScreen};
use super::list::{CountryCard, LIST_HEADING};
use super::{FLAG_UNAVAILABLE, Flag, Screen};
use crate::route::Route;
use crate::viz::{
    EXCLUDED_FOOTNOTE, INSUFFICIENT_MESSAGE, INSUFFICIENT_TITLE, PopulationChart,
    UNAVAILABLE_MESSAGE, UNAVAILABLE_TITLE, format_grouped, format_population,
};
use num_format::Locale;
use std::fmt::Write;

fn flag_line(flag: &Flag) -> String {
    match flag {
        Flag::Image { url, alt } => format!("{alt}: {url}"),
        Flag::Missing => FLAG_UNAVAILABLE.to_string(),
    }
}

fn status_block<C>(out: &mut String, screen: &Screen<C>) {
    match screen {
        Screen::Loading { message } | Screen::Empty { message } => {
            let _ = writeln!(out, "{message}");
        }
        Screen::Error {
            message,
            detail,
            retry,
        } => {
            let _ = writeln!(out, "{message}");
            let _ = writeln!(out, "  {detail}");
            if *retry {
                let _ = writeln!(out, "  (retry available)");
            }
        }
        Screen::Ready(_) => {}
    }
}

pub fn render_list(screen: &Screen<Vec<CountryCard>>) -> String {
    let mut out = String::new();
    let Screen::Ready(cards) = screen else {
        status_block(&mut out, screen);
        return out;
    };

    let _ = writeln!(out, "{LIST_HEADING} ({})", cards.len());
    let code_w = cards.iter().map(|c| c.code.chars().count()).max().unwrap_or(0);
    let name_w = cards.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
    for card in cards {
        let _ = writeln!(
            out,
            "  {:<code_w$}  {:<name_w$}  {}",
            card.code,
            card.name,
            card.route.href()
        );
    }
    out
}

pub fn render_chart(chart: &PopulationChart, locale: &Locale) -> String {
    let mut out = String::new();
    match chart {
        PopulationChart::Unavailable => {
            let _ = writeln!(out, "  {UNAVAILABLE_TITLE}");
            let _ = writeln!(out, "  {UNAVAILABLE_MESSAGE}");
        }
        PopulationChart::Insufficient { valid_points } => {
            let _ = writeln!(out, "  {INSUFFICIENT_TITLE}");
            let _ = writeln!(out, "  {INSUFFICIENT_MESSAGE}");
            let _ = writeln!(out, "  Current data points: {valid_points}");
        }
        PopulationChart::Line(series) => {
            for (year, value) in series.points() {
                let _ = writeln!(
                    out,
                    "  {year}  {:>7}  {:>15}",
                    format_population(*value),
                    format_grouped(*value, locale)
                );
            }
            if series.shows_footnote() {
                let _ = writeln!(out, "  {EXCLUDED_FOOTNOTE}");
            }
        }
    }
    out
}

fn render_borders(panel: &BorderPanel) -> String {
    let mut out = String::new();
    match panel {
        BorderPanel::Empty => {
            let _ = writeln!(out, "  {NO_BORDERS_MESSAGE}");
            let _ = writeln!(out, "  {NO_BORDERS_NOTE}");
        }
        BorderPanel::Grid(links) => {
            for link in links {
                let flag = match link.flag.url() {
                    Some(_) => String::new(),
                    None => format!("  [{FLAG_UNAVAILABLE}]"),
                };
                let _ = writeln!(out, "  {}  {}{flag}", link.name, link.route.href());
            }
        }
    }
    out
}

fn render_page(out: &mut String, page: &DetailPage, locale: &Locale) {
    let _ = writeln!(out, "{} ({})", page.name, page.code);
    let _ = writeln!(out, "{}", flag_line(&page.flag));
    let _ = writeln!(out);
    let _ = writeln!(out, "{CHART_HEADING}");
    out.push_str(&render_chart(&page.chart, locale));
    let _ = writeln!(out);
    let _ = writeln!(out, "{BORDERS_HEADING}");
    out.push_str(&render_borders(&page.borders));
}

pub fn render_detail(screen: &DetailScreen, locale: &Locale) -> String {
    let mut out = String::new();
    match &screen.body {
        Screen::Ready(page) => {
            let _ = writeln!(out, "<- {BACK_LINK} ({})", Route::List);
            render_page(&mut out, page, locale);
        }
        other => {
            let _ = writeln!(out, "[{}]", Route::country(&screen.code));
            status_block(&mut out, other);
            let _ = writeln!(out, "{BACK_LINK}: {}", screen.back());
        }
    }
    out
}
