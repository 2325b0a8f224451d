//! Feed transport — fetching one date batch of one feed.

use crate::config::ClientConfig;
use gridfeed_core::error::GridError;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw-payload transport. One call fetches one date batch of one feed.
///
/// The pipeline makes these calls sequentially, one per calendar date; a
/// failed call aborts the whole request with no retry and no partial result.
/// Tests substitute a fixture implementation.
pub trait FeedTransport: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, GridError>;
}

/// Blocking HTTP transport used in production.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }
}

impl FeedTransport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String, GridError> {
        debug!(url, "fetching feed payload");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| GridError::fetch(url, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url, %status, "feed request failed");
            return Err(GridError::fetch(url, format!("HTTP {status}")));
        }

        resp.text().map_err(|e| GridError::fetch(url, e.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}
