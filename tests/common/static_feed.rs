//! In-memory [`FeedSource`] doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use cmm_feeds::{FeedError, FeedSource};

/// Serves the same body on every fetch, or fails every fetch with a status.
pub struct StaticFeed {
    body: Result<String, StatusCode>,
    fetches: AtomicUsize,
}

impl StaticFeed {
    pub fn ok(body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            body: Ok(body.into()),
            fetches: AtomicUsize::new(0),
        })
    }

    /// Every fetch fails as if the data server answered `502`.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            body: Err(StatusCode::BAD_GATEWAY),
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch_text(&self) -> Result<String, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.body.clone().map_err(FeedError::Status)
    }

    fn describe(&self) -> &str {
        "static://feed"
    }
}
