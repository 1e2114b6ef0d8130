/*!
 * Desktop front-end for country-explorer
 *
 * - Landing page lists every country; a card opens its detail page
 * - Detail page: flag, population chart, neighbouring countries
 * - Network errors offer a Retry button; stale responses are ignored on navigation
 * - The current chart can be exported as SVG, the population series as CSV
 *
 * Platform support: Windows, macOS, Linux
 */

use country_explorer::views::borders::{BORDERS_HEADING, NO_BORDERS_MESSAGE, NO_BORDERS_NOTE};
use country_explorer::views::detail::{BACK_LINK, CHART_HEADING};
use country_explorer::views::list::LIST_HEADING;
use country_explorer::views::{
    BorderPanel, CountryCard, DetailPage, DetailView, FLAG_UNAVAILABLE, Flag, ListView, Screen,
};
use country_explorer::viz::{
    self, EXCLUDED_FOOTNOTE, INSUFFICIENT_MESSAGE, INSUFFICIENT_TITLE, PopulationChart,
    PopulationSeries, UNAVAILABLE_MESSAGE, UNAVAILABLE_TITLE, format_population,
};
use country_explorer::{Client, Config, CountrySource, LoadState, Route, storage};
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const GRID_COLUMNS: usize = 3;
const SERIES_COLOR: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let config = match Config::load(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let client = match Client::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create API client: {:#}", e);
            std::process::exit(1);
        }
    };
    let app = ExplorerApp::new(Arc::new(client));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Country Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Country Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}

/// The page currently mounted. Going back to the list re-mounts it.
enum Page {
    List(ListView),
    Detail(DetailView),
}

/// What the user asked for during this frame; applied after drawing.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Go(Route),
    Retry,
    ExportChart,
    ExportCsv,
}

struct ExplorerApp {
    source: Arc<dyn CountrySource>,
    page: Page,
    status_message: String,
    error_message: String,
}

impl ExplorerApp {
    fn new(source: Arc<dyn CountrySource>) -> Self {
        let page = Page::List(ListView::open(Arc::clone(&source)));
        Self {
            source,
            page,
            status_message: String::new(),
            error_message: String::new(),
        }
    }

    fn route(&self) -> Route {
        match &self.page {
            Page::List(_) => Route::List,
            Page::Detail(v) => Route::country(v.code()),
        }
    }

    fn go(&mut self, route: Route) {
        self.status_message.clear();
        self.error_message.clear();
        match route {
            Route::Country(code) => {
                // Following a border keeps the same detail view.
                if let Page::Detail(view) = &mut self.page {
                    view.navigate(&code);
                } else {
                    self.page = Page::Detail(DetailView::open(Arc::clone(&self.source), &code));
                }
            }
            Route::List => {
                self.page = Page::List(ListView::open(Arc::clone(&self.source)));
            }
        }
    }

    fn is_loading(&self) -> bool {
        match &self.page {
            Page::List(v) => v.state().is_loading(),
            Page::Detail(v) => v.state().is_loading(),
        }
    }

    fn poll(&mut self) {
        match &mut self.page {
            Page::List(v) => v.poll(),
            Page::Detail(v) => v.poll(),
        };
    }

    fn retry(&mut self) {
        match &mut self.page {
            Page::List(v) => v.retry(),
            Page::Detail(v) => v.retry(),
        };
    }

    fn export(&mut self, action: &Action) {
        let Page::Detail(view) = &self.page else {
            return;
        };
        let LoadState::Success(detail) = view.state() else {
            return;
        };
        let (ext, label) = match action {
            Action::ExportChart => ("svg", "SVG image"),
            _ => ("csv", "CSV"),
        };
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start_dir)
            .set_file_name(format!("{}_population.{ext}", detail.code))
            .add_filter(label, &[ext])
            .save_file()
        else {
            return;
        };

        let result = if ext == "svg" {
            let chart = PopulationChart::from_samples(&detail.population);
            let title = format!("Population of {}", detail.name);
            viz::svg::write_svg(&chart, &title, &path, 1000, 600)
        } else {
            storage::save_csv(detail, &path)
        };
        match result {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                self.error_message.clear();
            }
            Err(e) => {
                self.error_message = format!("Export failed: {e:#}");
                self.status_message.clear();
            }
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        // Keep polling the worker while a fetch is outstanding.
        if self.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let route = self.route();
        let loading = self.is_loading();
        egui::TopBottomPanel::top("route_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(route.href());
                if loading {
                    ui.spinner();
                }
            });
        });

        let mut action: Option<Action> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                action = match &self.page {
                    Page::List(view) => list_ui(ui, &view.screen()),
                    Page::Detail(view) => {
                        let screen = view.screen();
                        let mut act = None;
                        if ui.link(format!("← {BACK_LINK}")).clicked() {
                            act = Some(Action::Go(screen.back()));
                        }
                        ui.add_space(8.0);
                        let inner = match &screen.body {
                            Screen::Ready(page) => detail_ui(ui, page),
                            other => status_ui(ui, other),
                        };
                        act.or(inner)
                    }
                };

                ui.add_space(10.0);
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });
        });

        match action {
            Some(Action::Go(route)) => self.go(route),
            Some(Action::Retry) => self.retry(),
            Some(a @ (Action::ExportChart | Action::ExportCsv)) => self.export(&a),
            None => {}
        }
    }
}

/// Loading / error / empty states. Only the error state has a button.
fn status_ui<C>(ui: &mut egui::Ui, screen: &Screen<C>) -> Option<Action> {
    match screen {
        Screen::Loading { message } => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(*message);
            });
            None
        }
        Screen::Error {
            message,
            detail,
            retry,
        } => {
            ui.colored_label(egui::Color32::RED, *message);
            ui.small(detail.as_str());
            if *retry && ui.button("Retry").clicked() {
                Some(Action::Retry)
            } else {
                None
            }
        }
        Screen::Empty { message } => {
            ui.label(*message);
            None
        }
        Screen::Ready(_) => None,
    }
}

fn flag_ui(ui: &mut egui::Ui, flag: &Flag) {
    match flag {
        Flag::Image { url, alt } => {
            ui.hyperlink_to(alt.as_str(), url);
        }
        Flag::Missing => {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.weak(FLAG_UNAVAILABLE);
            });
        }
    }
}

fn card_ui(ui: &mut egui::Ui, name: &str, code: Option<&str>, flag: &Flag) -> bool {
    let mut clicked = false;
    ui.group(|ui| {
        ui.vertical(|ui| {
            flag_ui(ui, flag);
            clicked = ui.link(name).clicked();
            if let Some(code) = code {
                ui.small(code);
            }
        });
    });
    clicked
}

fn list_ui(ui: &mut egui::Ui, screen: &Screen<Vec<CountryCard>>) -> Option<Action> {
    let Screen::Ready(cards) = screen else {
        return status_ui(ui, screen);
    };
    ui.heading(LIST_HEADING);
    ui.add_space(8.0);

    let mut action = None;
    egui::Grid::new("country_cards")
        .num_columns(GRID_COLUMNS)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (i, card) in cards.iter().enumerate() {
                if card_ui(ui, &card.name, Some(&card.code), &card.flag) {
                    action = Some(Action::Go(card.route.clone()));
                }
                if (i + 1) % GRID_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });
    action
}

fn detail_ui(ui: &mut egui::Ui, page: &DetailPage) -> Option<Action> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading(page.name.as_str());
        ui.weak(page.code.as_str());
    });
    flag_ui(ui, &page.flag);
    ui.add_space(12.0);

    ui.group(|ui| {
        ui.strong(CHART_HEADING);
        chart_ui(ui, &page.chart);
        ui.horizontal(|ui| {
            if ui.button("Export chart…").clicked() {
                action = Some(Action::ExportChart);
            }
            if ui.button("Export CSV…").clicked() {
                action = Some(Action::ExportCsv);
            }
        });
    });
    ui.add_space(12.0);

    ui.group(|ui| {
        ui.strong(BORDERS_HEADING);
        if let Some(a) = borders_ui(ui, &page.borders) {
            action = Some(a);
        }
    });
    action
}

fn borders_ui(ui: &mut egui::Ui, panel: &BorderPanel) -> Option<Action> {
    if panel.is_empty() {
        ui.label(NO_BORDERS_MESSAGE);
        ui.small(NO_BORDERS_NOTE);
        return None;
    }
    let mut action = None;
    egui::Grid::new("border_cards")
        .num_columns(GRID_COLUMNS)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (i, link) in panel.links().iter().enumerate() {
                if card_ui(ui, &link.name, None, &link.flag) {
                    action = Some(Action::Go(link.route.clone()));
                }
                if (i + 1) % GRID_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });
    action
}

fn chart_ui(ui: &mut egui::Ui, chart: &PopulationChart) {
    match chart {
        PopulationChart::Unavailable => {
            ui.label(UNAVAILABLE_TITLE);
            ui.weak(UNAVAILABLE_MESSAGE);
        }
        PopulationChart::Insufficient { valid_points } => {
            ui.colored_label(egui::Color32::from_rgb(161, 98, 7), INSUFFICIENT_TITLE);
            ui.weak(INSUFFICIENT_MESSAGE);
            ui.small(format!("Current data points: {valid_points}"));
        }
        PopulationChart::Line(series) => {
            line_chart_ui(ui, series);
            if series.shows_footnote() {
                ui.small(EXCLUDED_FOOTNOTE);
            }
        }
    }
}

/// Line chart drawn with the egui painter: Y grid with compact labels, year
/// labels at both ends and the middle, hover shows the nearest sample.
fn line_chart_ui(ui: &mut egui::Ui, series: &PopulationSeries) {
    let size = egui::vec2(ui.available_width().clamp(300.0, 900.0), 320.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(64.0, 12.0),
        rect.max - egui::vec2(16.0, 28.0),
    );

    let (x0, x1) = series.year_range();
    let (y0, y1) = series.value_range();
    let to_screen = |year: i32, v: f64| {
        let tx = year.abs_diff(x0) as f32 / x1.abs_diff(x0).max(1) as f32;
        let ty = ((v - y0) / (y1 - y0)) as f32;
        egui::pos2(
            plot.left() + tx * plot.width(),
            plot.bottom() - ty * plot.height(),
        )
    };

    let text_color = ui.visuals().text_color();
    let grid = egui::Stroke::new(1.0, ui.visuals().faint_bg_color);
    let font = egui::FontId::proportional(11.0);

    for i in 0..=4 {
        let v = y0 + (y1 - y0) * i as f64 / 4.0;
        let y = to_screen(x0, v).y;
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            grid,
        );
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            format_population(v),
            font.clone(),
            text_color,
        );
    }
    for year in [x0, ((i64::from(x0) + i64::from(x1)) / 2) as i32, x1] {
        let x = to_screen(year, y0).x;
        painter.text(
            egui::pos2(x, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            year.to_string(),
            font.clone(),
            text_color,
        );
    }
    painter.rect_stroke(plot, 0.0, egui::Stroke::new(1.0, text_color.gamma_multiply(0.3)));

    let points: Vec<egui::Pos2> = series
        .points()
        .iter()
        .map(|(year, v)| to_screen(*year, *v))
        .collect();
    painter.add(egui::Shape::line(
        points.clone(),
        egui::Stroke::new(2.0, SERIES_COLOR),
    ));

    if let Some(hover) = response.hover_pos() {
        let nearest = points
            .iter()
            .zip(series.points())
            .min_by(|a, b| {
                (a.0.x - hover.x)
                    .abs()
                    .total_cmp(&(b.0.x - hover.x).abs())
            });
        if let Some((pos, (year, value))) = nearest {
            painter.circle_filled(*pos, 4.0, SERIES_COLOR);
            response.on_hover_text(format!(
                "Year: {year}\nPopulation: {}",
                format_population(*value)
            ));
        }
    }
}
