//! Fetch-then-parse driver over a [`CatalogSource`]
//!
//! Plays the host's part: builds a request, hands it to a [`PageFetcher`],
//! and feeds the fetched page to the matching parser.

use crate::client::PageFetcher;
use crate::error::Result;
use crate::models::{EpisodeEntry, ListingQuery, StreamSource, TitleDetails, TitleEntry, TitlePage};
use crate::source::CatalogSource;
use tracing::{info, warn};

pub struct SourceSession<S, F> {
    source: S,
    fetcher: F,
}

impl<S: CatalogSource, F: PageFetcher> SourceSession<S, F> {
    pub fn new(source: S, fetcher: F) -> Self {
        Self { source, fetcher }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn listing(&self, query: &ListingQuery) -> Result<TitlePage> {
        let request = self.source.listing_request(query)?;
        let page = self.fetcher.fetch(&request).await?;
        Ok(self.source.parse_listing(&page.document()))
    }

    pub async fn details(&self, title: &TitleEntry) -> Result<TitleDetails> {
        let request = self.source.details_request(title)?;
        let page = self.fetcher.fetch(&request).await?;
        Ok(self.source.parse_details(&page.document()))
    }

    pub async fn episodes(&self, title: &TitleEntry) -> Result<Vec<EpisodeEntry>> {
        let request = self.source.episodes_request(title)?;
        let page = self.fetcher.fetch(&request).await?;
        let episodes = self.source.parse_episodes(&page.document(), &page.final_url);

        if episodes.is_empty() {
            warn!("⚠️ No episodes found for: {}", title.title);
        } else {
            info!("✅ Found {} episodes for: {}", episodes.len(), title.title);
        }
        Ok(episodes)
    }

    pub async fn videos(&self, episode: &EpisodeEntry) -> Result<Vec<StreamSource>> {
        let request = self.source.videos_request(episode)?;
        let page = self.fetcher.fetch(&request).await?;
        let sources = self.source.parse_videos(&page.document());

        if sources.is_empty() {
            warn!("⚠️ No playable sources found for: {}", episode.name);
        }
        Ok(sources)
    }
}
