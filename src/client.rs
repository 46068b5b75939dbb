/// Page transport: executes request descriptors over HTTP
use crate::config::SourceConfig;
use crate::document::Document;
use crate::error::{Result, SourceError};
use crate::models::{HttpMethod, RequestDescriptor};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// A fetched page body and the URL it was finally served from
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub final_url: String,
    pub body: String,
}

impl FetchedPage {
    pub fn new(final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            final_url: final_url.into(),
            body: body.into(),
        }
    }

    pub fn document(&self) -> Document {
        Document::parse_with_url(&self.body, &self.final_url)
    }
}

/// Trait for page transports
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<FetchedPage>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new fetcher instance
    pub fn new(config: &SourceConfig) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<FetchedPage> {
        info!("🌐 Fetching page: {}", request.url);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        debug!("📄 Downloaded {} characters from {}", body.len(), final_url);

        Ok(FetchedPage { final_url, body })
    }
}
