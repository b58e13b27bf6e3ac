mod cli;
mod config;
mod terminal;
mod theme;

use std::process::ExitCode;

use finder_client::telemetry;
use finder_client::{DoctorFinderService, HealthService};
use search_flow::{DEFAULT_REQUEST_TIMEOUT, LocationMode, SearchController, SearchState};
use symptom_suggest::{Autosuggest, SymptomVocabulary};
use tracing::{Level, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Session;
use crate::config::AppConfig;
use crate::terminal::TerminalSurface;
use crate::theme::ThemeStore;

const USAGE: &str = "\
usage: doc-locator                      interactive prompt
       doc-locator <city> <symptoms...> single search

location: GEO_LAT/GEO_LNG for a fixed position, or GEO_MODE=ip for an IP lookup";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Optional .env; real environment wins.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("error", Level::WARN))
        .with(telemetry::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(String::as_str), Some("-h" | "--help")) {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = AppConfig::from_env()?;
    let vocabulary = SymptomVocabulary::load_or_builtin(cfg.vocab_path.as_deref())?;
    info!(
        endpoint = %cfg.finder.base_url(),
        geo_mode = ?cfg.location.mode,
        vocabulary = vocabulary.len(),
        "starting doc-locator"
    );
    match cfg.location.mode {
        LocationMode::Ip => info!(lookup = %cfg.location.ip_url, "position from IP lookup"),
        LocationMode::Off => info!("location off; set GEO_MODE=ip or GEO_LAT/GEO_LNG to search"),
        LocationMode::Fixed => {}
    }

    let themes = ThemeStore::from_env();
    let controller = SearchController::new(TerminalSurface::stdout(themes.load()))
        .with_location_timeout(cfg.location.timeout())
        .with_request_timeout(cfg.finder.timeout().max(DEFAULT_REQUEST_TIMEOUT));

    let mut session = Session::new(
        Autosuggest::new(&vocabulary).with_limit(cfg.suggest_limit),
        controller,
        cfg.location.build_source()?,
        DoctorFinderService::new(cfg.finder.clone())?,
        HealthService::new(&cfg.finder)?,
        themes,
    );

    match args.split_first() {
        Some((city, symptoms)) if !symptoms.is_empty() => {
            let state = session.run_once(city, &symptoms.join(" ")).await;
            Ok(match state {
                SearchState::Error(_) => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Some(_) => {
            eprintln!("{USAGE}");
            Ok(ExitCode::from(2))
        }
        None => {
            session.run_interactive().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
