//! SVG rendering of a [`PopulationChart`] through plotters.
//!
//! - Single blue series, light grid, `Year` / `Population` axis titles
//! - Y ticks use the compact `K`/`M`/`B` labels
//! - Placeholders are drawn as centered text so the output is always a valid SVG

use super::text::truncate_to_width;
use super::util::{GRID_GRAY, SERIES_BLUE, compute_left_label_area_px, format_population};
use super::{
    EXCLUDED_FOOTNOTE, INSUFFICIENT_MESSAGE, INSUFFICIENT_TITLE, PopulationChart,
    PopulationSeries, UNAVAILABLE_MESSAGE, UNAVAILABLE_TITLE,
};
use anyhow::{Context, Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const MARGIN: u32 = 16;
const FOOTNOTE_BAND_PX: i32 = 28;
const Y_TICKS: usize = 8;

/// Render the chart to an SVG document held in memory.
pub fn render_svg(chart: &PopulationChart, title: &str, width: u32, height: u32) -> Result<String> {
    if width < 100 || height < 100 {
        return Err(anyhow!("chart size {width}x{height} is too small"));
    }
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        match chart {
            PopulationChart::Line(series) => draw_line_chart(root, series, title)?,
            PopulationChart::Unavailable => {
                draw_placeholder(root, UNAVAILABLE_TITLE, &[UNAVAILABLE_MESSAGE])?
            }
            PopulationChart::Insufficient { valid_points } => draw_placeholder(
                root,
                INSUFFICIENT_TITLE,
                &[
                    INSUFFICIENT_MESSAGE,
                    &format!("Current data points: {valid_points}"),
                ],
            )?,
        }
    }
    Ok(buf)
}

/// Render the chart and write it to `out_path`.
pub fn write_svg<P: AsRef<Path>>(
    chart: &PopulationChart,
    title: &str,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let svg = render_svg(chart, title, width, height)?;
    std::fs::write(out_path, svg).with_context(|| format!("write {}", out_path.display()))
}

fn centered(font_px: u32, color: RGBColor) -> TextStyle<'static> {
    (FontFamily::SansSerif, font_px)
        .into_font()
        .color(&color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

fn draw_placeholder<DB>(root: DrawingArea<DB, Shift>, title: &str, lines: &[&str]) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (w, h) = root.dim_in_pixel();
    let cx = (w / 2) as i32;
    let mut y = (h / 2) as i32 - 20 * lines.len() as i32;

    root.draw(&Text::new(title, (cx, y), centered(22, RGBColor(55, 65, 81))))
        .map_err(|e| anyhow!("{:?}", e))?;
    for line in lines {
        y += 32;
        root.draw(&Text::new(*line, (cx, y), centered(14, RGBColor(107, 114, 128))))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_line_chart<DB>(root: DrawingArea<DB, Shift>, series: &PopulationSeries, title: &str) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (w, h) = root.dim_in_pixel();

    let (plot_area, foot_area) = if series.shows_footnote() {
        let (plot, foot) = root.split_vertically((h as i32 - FOOTNOTE_BAND_PX).max(40));
        (plot, Some(foot))
    } else {
        (root, None)
    };

    let (x0, x1) = series.year_range();
    let (y0, y1) = series.value_range();
    let left_px = compute_left_label_area_px(y0, y1, Y_TICKS, 12);
    let caption = truncate_to_width(title, 22, w.saturating_sub(2 * MARGIN));

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .caption(caption, (FontFamily::SansSerif, 22))
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(x0 as f64..x1 as f64, y0..y1)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |x: &f64| format!("{}", x.round() as i32);
    let y_label_fmt = |v: &f64| format_population(*v);
    let x_label_count = (x1.abs_diff(x0) as usize).saturating_add(1).min(12);

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Population")
        .x_labels(x_label_count)
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .light_line_style(GRID_GRAY.stroke_width(1))
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(LineSeries::new(
            series.points().iter().map(|(x, y)| (*x as f64, *y)),
            SERIES_BLUE.stroke_width(2),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;

    if let Some(foot) = foot_area {
        let (fw, fh) = foot.dim_in_pixel();
        foot.draw(&Text::new(
            EXCLUDED_FOOTNOTE,
            ((fw / 2) as i32, (fh / 2) as i32),
            centered(12, RGBColor(107, 114, 128)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
        foot.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
