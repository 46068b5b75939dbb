/// Episode resolution for catalog titles
///
/// A title is either one movie, whose own page is the only episode, or a
/// series grouped from per-episode posts. Series episodes are found by
/// searching the site for the series name.
use crate::catalog::{parse_listing_items, search_url};
use crate::document::Document;
use crate::error::Result;
use crate::models::{EpisodeEntry, TitleEntry, TitleKind};
use crate::urls::{site_url, strip_base};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};
use url::Url;

/// Name of the single pseudo-episode of a movie
pub const FULL_MOVIE_LABEL: &str = "Full Movie";

static EPISODE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)E(\d+)").unwrap());

/// URL to fetch for a title's episode list
///
/// Series search for their exact name; movies reuse their own page.
pub fn episode_list_url(base: &Url, title: &TitleEntry) -> Result<Url> {
    match title.kind() {
        TitleKind::Series { name } => {
            debug!("Resolving series '{}' through site search", name);
            search_url(base, &name, 1)
        }
        TitleKind::Movie => site_url(base, title.page_path()),
    }
}

/// True when `request_url` is a site search, i.e. the series path
pub fn is_series_search(request_url: &str) -> bool {
    match Url::parse(request_url) {
        Ok(url) => url.query_pairs().any(|(key, _)| key == "s"),
        Err(_) => request_url.contains("?s="),
    }
}

/// Episode number from a post title (`...E05...` -> 5)
pub fn episode_number(title: &str) -> Option<f32> {
    EPISODE_NUMBER_RE
        .captures(title)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse::<f32>().ok())
}

/// Parse the response to [`episode_list_url`]
pub fn parse_episodes(doc: &Document, request_url: &str, base: &Url) -> Vec<EpisodeEntry> {
    if is_series_search(request_url) {
        parse_series_episodes(doc, base)
    } else {
        vec![movie_episode(request_url, base)]
    }
}

/// Every search hit is one episode, highest number first
///
/// Hits without an `E<n>` token are numbered by their card position
/// (1-based, counting every card on the page).
pub fn parse_series_episodes(doc: &Document, base: &Url) -> Vec<EpisodeEntry> {
    let mut episodes: Vec<EpisodeEntry> = parse_listing_items(doc, base)
        .into_iter()
        .map(|item| {
            let number = episode_number(&item.raw_title).unwrap_or_else(|| {
                debug!("No episode number in '{}', using position {}", item.raw_title, item.position);
                item.position as f32
            });

            EpisodeEntry {
                name: item.raw_title,
                episode_number: number,
                url: item.path,
                date_upload: item.published,
            }
        })
        .collect();

    episodes.sort_by(|a, b| {
        b.episode_number
            .partial_cmp(&a.episode_number)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!("🎬 Resolved {} series episodes", episodes.len());
    episodes
}

/// The single episode of a movie: the page that was just fetched
pub fn movie_episode(request_url: &str, base: &Url) -> EpisodeEntry {
    EpisodeEntry {
        name: FULL_MOVIE_LABEL.to_string(),
        episode_number: 1.0,
        url: strip_base(base, request_url),
        date_upload: None,
    }
}
