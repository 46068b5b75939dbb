//! Host-facing source contract and the MediaServer implementation

use crate::catalog::{self, category_filter};
use crate::config::SourceConfig;
use crate::document::Document;
use crate::episodes;
use crate::error::Result;
use crate::models::{
    EpisodeEntry, FilterDescriptor, ListingQuery, RequestDescriptor, StreamSource, TitleDetails,
    TitleEntry, TitlePage,
};
use crate::urls::site_url;
use crate::video;
use tracing::debug;
use url::Url;

/// The four request/parse pairs a host drives
///
/// Request builders only describe what to fetch; the host performs the
/// fetch and hands the parsed page back to the matching parser.
pub trait CatalogSource {
    fn name(&self) -> &str;
    fn lang(&self) -> &str;
    fn id(&self) -> u64;
    fn supports_latest(&self) -> bool;
    fn base_url(&self) -> &Url;

    fn listing_request(&self, query: &ListingQuery) -> Result<RequestDescriptor>;
    fn parse_listing(&self, doc: &Document) -> TitlePage;

    fn details_request(&self, title: &TitleEntry) -> Result<RequestDescriptor>;
    fn parse_details(&self, doc: &Document) -> TitleDetails;

    fn episodes_request(&self, title: &TitleEntry) -> Result<RequestDescriptor>;
    /// `request_url` is the final URL of the fetched episode-list request
    fn parse_episodes(&self, doc: &Document, request_url: &str) -> Vec<EpisodeEntry>;

    fn videos_request(&self, episode: &EpisodeEntry) -> Result<RequestDescriptor>;
    fn parse_videos(&self, doc: &Document) -> Vec<StreamSource>;

    fn filters(&self) -> Vec<FilterDescriptor>;
}

/// Source for the MediaServer WordPress site
#[derive(Debug, Clone)]
pub struct MediaServer {
    config: SourceConfig,
    base_url: Url,
}

impl MediaServer {
    pub const NAME: &'static str = "MediaServer";
    pub const LANG: &'static str = "en";
    pub const ID: u64 = 3615736726452648083;

    /// Create a source after validating its configuration
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)?;
        debug!("MediaServer source rooted at {}", base_url);
        Ok(Self { config, base_url })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn get(&self, url: Url) -> RequestDescriptor {
        RequestDescriptor::get(url).with_header("User-Agent", self.config.user_agent.clone())
    }
}

impl CatalogSource for MediaServer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn lang(&self) -> &str {
        Self::LANG
    }

    fn id(&self) -> u64 {
        Self::ID
    }

    fn supports_latest(&self) -> bool {
        true
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn listing_request(&self, query: &ListingQuery) -> Result<RequestDescriptor> {
        Ok(self.get(catalog::listing_url(&self.base_url, query)?))
    }

    fn parse_listing(&self, doc: &Document) -> TitlePage {
        catalog::parse_listing(doc, &self.base_url)
    }

    fn details_request(&self, title: &TitleEntry) -> Result<RequestDescriptor> {
        Ok(self.get(site_url(&self.base_url, title.page_path())?))
    }

    fn parse_details(&self, doc: &Document) -> TitleDetails {
        catalog::parse_details(doc)
    }

    fn episodes_request(&self, title: &TitleEntry) -> Result<RequestDescriptor> {
        Ok(self.get(episodes::episode_list_url(&self.base_url, title)?))
    }

    fn parse_episodes(&self, doc: &Document, request_url: &str) -> Vec<EpisodeEntry> {
        episodes::parse_episodes(doc, request_url, &self.base_url)
    }

    fn videos_request(&self, episode: &EpisodeEntry) -> Result<RequestDescriptor> {
        Ok(self.get(site_url(&self.base_url, &episode.url)?))
    }

    fn parse_videos(&self, doc: &Document) -> Vec<StreamSource> {
        video::parse_video_sources(doc, &self.base_url)
    }

    fn filters(&self) -> Vec<FilterDescriptor> {
        vec![category_filter()]
    }
}
