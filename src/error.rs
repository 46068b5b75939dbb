//! Error types for source operations

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Error types for source operations
///
/// Parsers never return these: a malformed listing item or player blob is
/// skipped where it is found. Errors only come out of request building
/// (bad base URL), configuration loading and the bundled HTTP transport.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
