//! HTTP client for the remote directory API

use crate::config::SourceConfig;
use crate::source::types::{DirectoryResponse, ListingPage};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Page size fixed by the remote service; the `pn` query parameter is a
/// zero-based page index over pages of this size.
pub const PAGE_SIZE: u64 = 20;

/// Errors from the directory source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("directory returned HTTP {status} for page {page}")]
    Status { status: u16, page: u64 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to decode directory response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the paginated directory listing endpoint
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    /// Creates a new directory client from the source configuration
    pub fn new(config: &SourceConfig) -> Result<Self, reqwest::Error> {
        let user_agent = format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetches one page of listings
    ///
    /// # Arguments
    ///
    /// * `page` - Zero-based page index
    ///
    /// # Returns
    ///
    /// * `Ok(ListingPage)` - The page's listings plus the directory's total count
    /// * `Err(SourceError)` - Transport failure, non-2xx status, or decode failure
    pub async fn fetch_page(&self, page: u64) -> Result<ListingPage, SourceError> {
        let url = format!("{}?wd=star&type=tag&pn={}&lg=en", self.base_url, page);
        tracing::debug!("Fetching directory page {} from {}", page, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                page,
            });
        }

        let body = response.text().await?;
        let decoded: DirectoryResponse = serde_json::from_str(&body)?;
        Ok(decoded.into_page())
    }
}
