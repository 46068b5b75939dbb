//! MediaServer catalog source
//!
//! Browse, search, episode and stream extraction for the MediaServer
//! WordPress video site, packaged as a host-driven source: every operation
//! is a request builder plus a parser over the fetched page.

pub mod catalog;
pub mod client;
pub mod config;
pub mod document;
pub mod episodes;
pub mod error;
pub mod models;
pub mod session;
pub mod source;
pub mod urls;
pub mod video;

// Re-export main types for easy access
pub use crate::client::{FetchedPage, HttpFetcher, PageFetcher};
pub use crate::config::{ConfigBuilder, SourceConfig};
pub use crate::document::Document;
pub use crate::error::{Result, SourceError};
pub use crate::models::{
    EpisodeEntry, FilterDescriptor, ListingMode, ListingQuery, RequestDescriptor, StreamSource,
    TitleDetails, TitleEntry, TitleKind, TitlePage, TitleStatus,
};
pub use crate::session::SourceSession;
pub use crate::source::{CatalogSource, MediaServer};
