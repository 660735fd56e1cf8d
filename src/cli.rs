use crate::config::{Endpoints, ResolvedConfig};
use crate::errors::{AppError, AppResult};
use crate::fetcher::HttpTransport;
use crate::map::MapService;
use crate::reference::ReferenceTable;
use crate::service::{fetch_measurement_article, fetch_recommendations, today, PollenService};
use crate::ui;
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
pub fn command() -> Command<'static> {
    Command::new("pollen-hdf")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a TOML configuration file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("pollen")
                .about("Show the pollen risk of a town")
                .after_help("Example:\n  pollen-hdf pollen \"Le Portel\" --html dashboard.html")
                .arg(
                    Arg::new("town")
                        .help("Town name, case and spacing do not matter")
                        .required(true)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("date")
                        .short('d')
                        .long("date")
                        .help("Query date (YYYY-MM-DD), defaults to today")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Also write an HTML dashboard page with the town map")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("towns")
                .about("List the known towns")
                .arg(
                    Arg::new("department")
                        .long("department")
                        .help("Only towns of this department")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("map")
                .about("Write the region map, or the map of a town")
                .arg(Arg::new("town").help("Town name").action(ArgAction::Set)),
        )
        .subcommand(Command::new("recommendations").about("Show allergy recommendations"))
        .subcommand(Command::new("measurement").about("Explain how pollens are measured"))
}

/// Parses command-line arguments and runs the selected subcommand.
///
/// Configuration is read first (`--config`, else defaults), then the reference table
/// is loaded once for the subcommands that need it. A failed load stops the process.
/// Query failures are reported through [`ui`] and returned as errors.
pub async fn cli() -> AppResult<()> {
    let mut cmd_for_help = command();
    let matches = command().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ResolvedConfig::from_toml_file(path)?,
        None => ResolvedConfig::default(),
    };
    let endpoints = Endpoints::from_config(&config)?;
    let transport = HttpTransport::new(&config)?;
    let maps = MapService::new(&config.map_cache_dir, &endpoints);

    match matches.subcommand() {
        Some(("pollen", sub)) => {
            let service = load_service(&config, endpoints)?;
            let town = required(sub, "town")?;
            let date = match sub.get_one::<String>("date") {
                Some(raw) => parse_date(raw)?,
                None => today(),
            };

            let result = service.resolve_and_fetch_on(town, &transport, date).await?;
            print!("{}", ui::render_query_result(&result));

            if let Some(out) = sub.get_one::<PathBuf>("html") {
                let map_html = match &result.resolved_town {
                    Some(town) => {
                        let path = maps.town_map(&transport, town).await?;
                        Some(fs::read_to_string(path).await?)
                    }
                    None => None,
                };
                write_page(out, &ui::render_dashboard_page(&result, map_html.as_deref())).await?;
            }
        }
        Some(("towns", sub)) => {
            let service = load_service(&config, endpoints)?;
            let table = service.table();
            let listing = match sub.get_one::<String>("department") {
                Some(dept) => ui::render_towns(table.in_department(dept)),
                None => ui::render_towns(table.towns()),
            };
            print!("{listing}");
        }
        Some(("map", sub)) => {
            let path = match sub.get_one::<String>("town") {
                Some(name) => {
                    let service = load_service(&config, endpoints)?;
                    let town = service.resolve(name)?;
                    maps.town_map(&transport, town).await?
                }
                None => maps.region_map(&transport).await?,
            };
            println!("{}", path.display());
        }
        Some(("recommendations", _)) => {
            let recs = fetch_recommendations(&transport, &endpoints, today()).await?;
            print!("{}", ui::render_recommendations(&recs));
        }
        Some(("measurement", _)) => {
            let article = fetch_measurement_article(&transport, &endpoints).await?;
            print!("{}", ui::render_measurement(&article));
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn load_service(config: &ResolvedConfig, endpoints: Endpoints) -> AppResult<PollenService> {
    let table = ReferenceTable::load(&config.reference_table, config.region.as_deref())?;
    Ok(PollenService::new(Arc::new(table), endpoints))
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> AppResult<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| AppError::InvalidInput(format!("missing argument {name}")))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::InvalidInput(format!("invalid date {raw:?}: {e}")))
}

async fn write_page(path: &Path, html: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, html).await?;
    info!(path = %path.display(), "Dashboard page written");
    Ok(())
}
