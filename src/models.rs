//! Value records passed between the host and the source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

/// Query marker appended to a series locator
pub const SERIES_FLAG_PARAM: &str = "is_series";

/// Query parameter carrying the url-encoded series name
pub const SERIES_NAME_PARAM: &str = "base_title";

/// Which listing the host asked for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    Popular,
    Latest,
    Search,
}

/// Parameters of one browse/search call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingQuery {
    pub mode: ListingMode,
    /// 1-based page index
    pub page: u32,
    pub query: Option<String>,
    /// Index into the category filter
    pub category: Option<usize>,
}

impl ListingQuery {
    pub fn popular(page: u32) -> Self {
        Self { mode: ListingMode::Popular, page, query: None, category: None }
    }

    pub fn latest(page: u32) -> Self {
        Self { mode: ListingMode::Latest, page, query: None, category: None }
    }

    pub fn search(page: u32, query: impl Into<String>) -> Self {
        Self {
            mode: ListingMode::Search,
            page,
            query: Some(query.into()),
            category: None,
        }
    }

    pub fn with_category(mut self, index: usize) -> Self {
        self.category = Some(index);
        self
    }
}

/// Whether a catalog entry is one movie or a whole series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TitleKind {
    Movie,
    Series { name: String },
}

impl TitleKind {
    /// Read the kind back out of a locator
    ///
    /// Locators look like `/path/?is_series=true&base_title=Show+Name`. The
    /// marker is the last `?is_series=` in the locator, so permalinks that
    /// already carry a query (`/index.php/?p=123`) keep it. Percent-encoded
    /// names are accepted too.
    pub fn from_locator(locator: &str) -> Self {
        let Some(query) = series_marker(locator).map(|pos| &locator[pos + 1..]) else {
            return TitleKind::Movie;
        };

        let mut is_series = false;
        let mut name = None;
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == SERIES_FLAG_PARAM && value == "true" {
                is_series = true;
            } else if key == SERIES_NAME_PARAM {
                let value = value.replace('+', " ");
                name = Some(
                    urlencoding::decode(&value)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or(value),
                );
            }
        }

        match (is_series, name) {
            (true, Some(name)) => TitleKind::Series { name },
            _ => TitleKind::Movie,
        }
    }

    /// Build the locator the host stores for this kind
    ///
    /// The series name is form-encoded (`Show+Name`).
    pub fn locator_for(&self, path: &str) -> String {
        match self {
            TitleKind::Movie => path.to_string(),
            TitleKind::Series { name } => format!(
                "{}?{}=true&{}={}",
                path,
                SERIES_FLAG_PARAM,
                SERIES_NAME_PARAM,
                form_urlencoded::byte_serialize(name.as_bytes()).collect::<String>()
            ),
        }
    }

    pub fn is_series(&self) -> bool {
        matches!(self, TitleKind::Series { .. })
    }
}

/// One catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleEntry {
    pub title: String,
    /// Relative locator, possibly carrying the series marker
    pub url: String,
    pub thumbnail_url: Option<String>,
}

impl TitleEntry {
    pub fn new(title: impl Into<String>, path: &str, kind: &TitleKind) -> Self {
        Self {
            title: title.into(),
            url: kind.locator_for(path),
            thumbnail_url: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = thumbnail_url;
        self
    }

    pub fn kind(&self) -> TitleKind {
        TitleKind::from_locator(&self.url)
    }

    /// Locator with the series marker stripped
    pub fn page_path(&self) -> &str {
        match series_marker(&self.url) {
            Some(pos) => &self.url[..pos],
            None => &self.url,
        }
    }
}

/// Byte offset of the `?is_series=` marker in a locator
fn series_marker(locator: &str) -> Option<usize> {
    locator.rfind(&format!("?{}=", SERIES_FLAG_PARAM))
}

/// One page of listing results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TitlePage {
    pub titles: Vec<TitleEntry>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TitleStatus {
    Unknown,
    Ongoing,
    Completed,
}

/// Metadata shown on a title's detail screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleDetails {
    pub title: String,
    pub description: String,
    pub genres: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub status: TitleStatus,
}

/// One playable unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodeEntry {
    pub name: String,
    pub episode_number: f32,
    pub url: String,
    pub date_upload: Option<DateTime<Utc>>,
}

/// A direct playable URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamSource {
    pub url: String,
    pub quality: String,
    pub video_url: String,
}

impl StreamSource {
    pub fn new(url: String, quality: String) -> Self {
        Self {
            video_url: url.clone(),
            url,
            quality,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// A request the host should execute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Absolute URL, query included
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Decoded value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = Url::parse(&self.url).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Path of the request URL
    pub fn path(&self) -> String {
        Url::parse(&self.url)
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    }
}

/// A filter control the host renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FilterDescriptor {
    Select { name: String, options: Vec<String> },
}
