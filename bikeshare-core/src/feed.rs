use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use thiserror::Error;
use tracing::debug;

use crate::model::FeedSnapshot;

/// Public Citi Bike station feed. No authentication required.
pub const DEFAULT_FEED_URL: &str = "https://feeds.citibikenyc.com/stations/stations.json";

/// Errors from one station-feed fetch attempt. No variant is recovered
/// internally; all propagate unchanged to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed (connectivity, TLS, DNS, non-success status).
    #[error("failed to reach station feed: {0}")]
    Network(#[source] reqwest::Error),

    /// The transport succeeded but returned no payload.
    #[error("station feed returned an empty body")]
    EmptyBody,

    /// The payload was not a well-formed feed (malformed JSON, wrong shape,
    /// or a timestamp outside the feed's fixed format).
    #[error("failed to decode station feed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Source of station snapshots.
#[async_trait]
pub trait StationFeed: Send + Sync + Debug {
    /// Fetch and decode one snapshot. One request, no retries.
    async fn fetch_stations(&self) -> Result<FeedSnapshot, FetchError>;
}

/// HTTP client for the station feed.
///
/// Holds no mutable state, so instances are freely clonable and safe to call
/// repeatedly or concurrently.
#[derive(Debug, Clone)]
pub struct StationFeedClient {
    url: String,
    http: Client,
}

impl StationFeedClient {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_FEED_URL)
    }

    /// Point the client at a different feed URL (config override, tests).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for StationFeedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationFeed for StationFeedClient {
    async fn fetch_stations(&self) -> Result<FeedSnapshot, FetchError> {
        debug!(url = %self.url, "fetching station feed");

        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(FetchError::Network)?;

        let body = res.bytes().await.map_err(FetchError::Network)?;

        let snapshot = decode_snapshot(&body)?;
        debug!(stations = snapshot.stations.len(), "decoded station feed");
        Ok(snapshot)
    }
}

/// Decode raw feed bytes into a snapshot.
pub fn decode_snapshot(body: &[u8]) -> Result<FeedSnapshot, FetchError> {
    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    serde_json::from_slice(body).map_err(FetchError::Decode)
}
