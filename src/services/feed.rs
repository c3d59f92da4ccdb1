// src/services/feed.rs

//! Catalog feed fetching.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::FeedConfig;
use crate::utils::http::create_async_client;

/// Source of raw catalog documents.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the whole feed document.
    async fn fetch(&self) -> Result<String>;
}

/// Fetches the catalog CSV over HTTP.
pub struct FeedFetcher {
    client: Client,
    url: String,
}

impl FeedFetcher {
    /// Create a fetcher with a client built from the feed settings.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        Ok(Self::with_client(create_async_client(config)?, &config.csv_url))
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for FeedFetcher {
    async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FeedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
