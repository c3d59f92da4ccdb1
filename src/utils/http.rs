// src/utils/http.rs

//! HTTP client for the catalog feed.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::error::Result;
use crate::models::FeedConfig;

const FEED_ACCEPT: &str = "text/csv, text/plain;q=0.9, */*;q=0.1";

/// Build the client used for feed requests: configured user agent, one
/// timeout covering the whole request, CSV preferred.
pub fn create_async_client(config: &FeedConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(FEED_ACCEPT));

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}
