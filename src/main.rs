use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};
use mediaserver_source::catalog::CATEGORIES;
use mediaserver_source::{
    EpisodeEntry, HttpFetcher, ListingQuery, MediaServer, SourceConfig, SourceError, SourceSession,
    TitleEntry, TitleKind,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn page_arg() -> Arg {
    Arg::new("page")
        .short('p')
        .long("page")
        .value_name("N")
        .help("Listing page, starting at 1")
        .value_parser(value_parser!(u32))
        .default_value("1")
}

fn locator_arg(help: &'static str) -> Arg {
    Arg::new("locator").value_name("LOCATOR").help(help).required(true)
}

fn cli() -> Command {
    Command::new("MediaServer Source")
        .version("0.1.0")
        .author("TigreRoll")
        .about("Browse the MediaServer catalog and resolve playable streams")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("popular").about("Most viewed titles").arg(page_arg()))
        .subcommand(Command::new("latest").about("Newest titles").arg(page_arg()))
        .subcommand(
            Command::new("search")
                .about("Search by text, or browse a category when no text is given")
                .arg(page_arg())
                .arg(Arg::new("query").short('q').long("query").value_name("TEXT"))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("INDEX")
                        .help("Category index, see `categories`")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(Command::new("categories").about("List the category filter options"))
        .subcommand(
            Command::new("details")
                .about("Show metadata for a title")
                .arg(locator_arg("Title locator as printed by a listing")),
        )
        .subcommand(
            Command::new("episodes")
                .about("List the episodes of a title")
                .arg(locator_arg("Title locator as printed by a listing")),
        )
        .subcommand(
            Command::new("videos")
                .about("Extract stream URLs from an episode page")
                .arg(locator_arg("Episode locator as printed by `episodes`")),
        )
}

/// Load config; a failed default load falls back to defaults and hands the
/// error back so it can be logged once the subscriber is up
fn load_config(matches: &ArgMatches) -> Result<(SourceConfig, Option<SourceError>)> {
    let (config, load_error) = match matches.get_one::<String>("config") {
        Some(path) => (SourceConfig::load_from_path(&PathBuf::from(path))?, None),
        None => match SourceConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (SourceConfig::default(), Some(e)),
        },
    };
    config.validate()?;
    Ok((config, load_error))
}

/// `RUST_LOG` wins, then `--verbose`, then the configured level
fn log_filter(verbose: bool, log_level: &str, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::new(directives);
    }
    let level = if verbose { "debug".to_string() } else { log_level.to_ascii_lowercase() };
    EnvFilter::new(format!("mediaserver_source={level},mediaserver={level},warn"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn title_from_locator(locator: &str) -> TitleEntry {
    let kind = TitleKind::from_locator(locator);
    let title = match &kind {
        TitleKind::Series { name } => name.clone(),
        TitleKind::Movie => locator.to_string(),
    };
    TitleEntry {
        title,
        url: locator.to_string(),
        thumbnail_url: None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let verbose = matches.get_flag("verbose");
    let (config, load_error) = load_config(&matches)?;

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, &config.log_level, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }
    info!("🚀 MediaServer source starting against {}", config.base_url);
    debug!("{}", config.summary());

    let fetcher = HttpFetcher::new(&config);
    let session = SourceSession::new(MediaServer::new(config)?, fetcher);

    match matches.subcommand() {
        Some(("popular", sub)) => {
            let page = *sub.get_one::<u32>("page").unwrap_or(&1);
            print_json(&session.listing(&ListingQuery::popular(page)).await?)
        }
        Some(("latest", sub)) => {
            let page = *sub.get_one::<u32>("page").unwrap_or(&1);
            print_json(&session.listing(&ListingQuery::latest(page)).await?)
        }
        Some(("search", sub)) => {
            let page = *sub.get_one::<u32>("page").unwrap_or(&1);
            let text = sub.get_one::<String>("query").cloned().unwrap_or_default();
            let mut query = ListingQuery::search(page, text);
            query.category = sub.get_one::<usize>("category").copied();
            print_json(&session.listing(&query).await?)
        }
        Some(("categories", _)) => {
            let indexed: Vec<_> = CATEGORIES
                .iter()
                .enumerate()
                .map(|(index, option)| {
                    serde_json::json!({ "index": index, "label": option.label, "path": option.path })
                })
                .collect();
            print_json(&indexed)
        }
        Some(("details", sub)) => {
            let locator = sub.get_one::<String>("locator").map(String::as_str).unwrap_or("");
            print_json(&session.details(&title_from_locator(locator)).await?)
        }
        Some(("episodes", sub)) => {
            let locator = sub.get_one::<String>("locator").map(String::as_str).unwrap_or("");
            print_json(&session.episodes(&title_from_locator(locator)).await?)
        }
        Some(("videos", sub)) => {
            let locator = sub.get_one::<String>("locator").map(String::as_str).unwrap_or("");
            let episode = EpisodeEntry {
                name: locator.to_string(),
                episode_number: 1.0,
                url: locator.to_string(),
                date_upload: None,
            };
            print_json(&session.videos(&episode).await?)
        }
        _ => Err(anyhow::anyhow!("Unknown command")),
    }
}
