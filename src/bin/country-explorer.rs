use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use country_explorer::views::{DetailView, ListView, Screen, text};
use country_explorer::viz::{self, PopulationChart};
use country_explorer::{Client, Config, CountrySource, LoadState, Route, storage};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "country-explorer",
    version,
    about = "Browse countries, their neighbours, and population history"
)]
struct Cli {
    /// Base URL of the country API (e.g., http://localhost:8000/api).
    #[arg(long, env = "API_BASE", global = true)]
    api_base: Option<String>,
    /// Total request timeout in seconds (default: none).
    #[arg(long, global = true)]
    timeout: Option<u64>,
    /// Locale for full population numbers (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en", global = true)]
    locale: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every available country.
    List,
    /// Show one country (and optionally export its chart or data).
    Show(ShowArgs),
    /// Open a client-side route: `/` or `/country/{code}`.
    Open {
        route: String,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug, Default)]
struct ShowArgs {
    /// Country code as used by the API (taken verbatim).
    code: String,
    /// Write the population chart as SVG to this path.
    #[arg(long)]
    chart: Option<PathBuf>,
    /// Width of the chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Save the loaded country to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

/// Ask before re-issuing a failed request. Non-interactive runs never retry.
fn confirm_retry() -> bool {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return false;
    }
    eprint!("Retry? [y/N] ");
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    if stdin.lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let timeout = cli.timeout.map(Duration::from_secs);
    let mut config = Config::load(cli.api_base.as_deref())?;
    if timeout.is_some() {
        config = config.with_timeout(timeout);
    }
    let source: Arc<dyn CountrySource> = Arc::new(Client::new(&config)?);
    let locale = viz::map_locale(&cli.locale);
    let wait_for = config.timeout.unwrap_or(Duration::from_secs(300));

    match cli.cmd {
        Command::List => cmd_list(source, wait_for),
        Command::Show(args) => cmd_show(source, args, locale, wait_for),
        Command::Open { route } => match Route::parse(&route) {
            Some(Route::List) => cmd_list(source, wait_for),
            Some(Route::Country(code)) => cmd_show(
                source,
                ShowArgs {
                    code,
                    width: 1000,
                    height: 600,
                    ..Default::default()
                },
                locale,
                wait_for,
            ),
            None => bail!("unknown route `{route}` (expected `/` or `/country/<code>`)"),
        },
    }
}

fn cmd_list(source: Arc<dyn CountrySource>, wait_for: Duration) -> Result<()> {
    let mut view = ListView::open(source);
    loop {
        if !view.wait(wait_for) {
            bail!("gave up waiting for the country list");
        }
        let screen = view.screen();
        print!("{}", text::render_list(&screen));
        match screen {
            Screen::Error { .. } if confirm_retry() => {
                view.retry();
            }
            Screen::Error { detail, .. } => bail!(detail),
            _ => return Ok(()),
        }
    }
}

fn cmd_show(
    source: Arc<dyn CountrySource>,
    args: ShowArgs,
    locale: &'static num_format::Locale,
    wait_for: Duration,
) -> Result<()> {
    let mut view = DetailView::open(source, &args.code);
    loop {
        if !view.wait(wait_for) {
            bail!("gave up waiting for {}", args.code);
        }
        let screen = view.screen();
        print!("{}", text::render_detail(&screen, locale));
        match &screen.body {
            Screen::Error { .. } if confirm_retry() => {
                view.retry();
            }
            Screen::Error { detail, .. } => bail!(detail.clone()),
            _ => break,
        }
    }

    let LoadState::Success(detail) = view.state() else {
        return Ok(());
    };

    if let Some(path) = args.chart.as_ref() {
        let chart = PopulationChart::from_samples(&detail.population);
        let title = format!("Population of {}", detail.name);
        viz::svg::write_svg(&chart, &title, path, args.width, args.height)?;
        eprintln!("Wrote chart to {}", path.display());
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(detail, path)?,
            "json" => storage::save_json(detail, path)?,
            other => return Err(anyhow!("unsupported format: {}", other)),
        }
        eprintln!(
            "Saved {} population rows to {}",
            detail.population.len(),
            path.display()
        );
    }

    Ok(())
}
