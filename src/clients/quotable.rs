use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::QuotesConfig;
use crate::constants::http::USER_AGENT;

/// A quote shown next to set details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    pub author: String,
}

/// Client for a Quotable-compatible API. The service is treated as unreliable: callers are
/// expected to carry on without a quote when a request fails.
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new(config: &QuotesConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .context("Failed to build quote HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn random(&self) -> Result<Quote> {
        let url = format!("{}/random", self.base_url);
        debug!("Fetching quote from {url}");

        let quote = self
            .client
            .get(&url)
            .send()
            .await
            .context("Quote request failed")?
            .error_for_status()
            .context("Quote service returned an error")?
            .json::<Quote>()
            .await
            .context("Failed to parse quote")?;

        Ok(quote)
    }
}
