/// Series grouping and per-page title de-duplication
///
/// The site publishes one post per episode ("Show Name S01E05 1080p").
/// Listing pages collapse those posts into a single catalog entry per series
/// by normalizing the title and keeping only the first post per name.
use crate::models::TitleKind;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// `<series name> S<season>E<episode>...`, any case
static SERIES_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(.+)\s+S(\d+)E(\d+).*").unwrap());

/// Display title and kind for a raw post title
///
/// Titles that merely contain an `S..E..` shaped token are grouped too; the
/// match policy is kept as-is.
pub fn classify_title(raw_title: &str) -> (String, TitleKind) {
    match SERIES_TITLE_RE.captures(raw_title) {
        Some(captures) => {
            let name = captures
                .get(1)
                .map(|m| m.as_str().trim())
                .unwrap_or("")
                .to_string();
            (name.clone(), TitleKind::Series { name })
        }
        None => (raw_title.to_string(), TitleKind::Movie),
    }
}

/// Tracks display titles already emitted on one listing page
#[derive(Debug, Default)]
pub struct SeriesGrouper {
    seen: HashSet<String>,
}

impl SeriesGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a post; `None` when its display title was already emitted
    pub fn admit(&mut self, raw_title: &str) -> Option<(String, TitleKind)> {
        let (shown, kind) = classify_title(raw_title);
        if !self.seen.insert(shown.clone()) {
            debug!("Dropping duplicate listing entry '{}' (as '{}')", raw_title, shown);
            return None;
        }
        Some((shown, kind))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
