//! cmm-feeds — telemetry feed sources for cmm.
//!
//! A [`FeedSource`] returns the whole feed body as text. [`fetch_records`]
//! runs that text through the line parser and hands back the ordered
//! [`RecordStore`] for one fetch. The [`poller`] module drives repeated
//! fetch-and-derive cycles for polling consumers.

pub mod error;
pub mod http;
pub mod poller;

pub use error::FeedError;
pub use http::HttpFeed;
pub use poller::{Poller, Snapshot};

use async_trait::async_trait;
use cmm_core::{parse_feed, RecordStore};

/// Trait implemented by each telemetry feed source.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve the complete feed body. Any failure aborts the fetch.
    async fn fetch_text(&self) -> Result<String, FeedError>;

    /// Where the feed comes from, for logs and the realtime projection.
    fn describe(&self) -> &str;
}

/// Fetch the feed and parse it. Malformed lines are dropped; transport
/// failures propagate with no partial result.
pub async fn fetch_records(source: &dyn FeedSource) -> Result<RecordStore, FeedError> {
    let body = match source.fetch_text().await {
        Ok(body) => body,
        Err(error) => {
            tracing::warn!(source = source.describe(), %error, "feed fetch failed");
            return Err(error);
        }
    };
    let records = parse_feed(&body);
    tracing::debug!(
        source = source.describe(),
        bytes = body.len(),
        records = records.len(),
        "feed fetched"
    );
    Ok(records)
}
