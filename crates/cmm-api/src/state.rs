//! Shared handler state.

use std::sync::Arc;

use cmm_core::config::MaturityConfig;
use cmm_core::RecordStore;
use cmm_feeds::{fetch_records, FeedSource};

use crate::error::ApiError;

/// Cloned into every handler. Holds no records: each request fetches.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn FeedSource>,
    maturity: MaturityConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("source", &self.source.describe())
            .field("maturity", &self.maturity)
            .finish()
    }
}

impl AppState {
    pub fn new(source: Arc<dyn FeedSource>, maturity: MaturityConfig) -> Self {
        Self { source, maturity }
    }

    pub fn source(&self) -> &str {
        self.source.describe()
    }

    pub fn maturity(&self) -> &MaturityConfig {
        &self.maturity
    }

    /// Fetch and parse the feed, mapping failure to `context`.
    pub async fn load(&self, context: &'static str) -> Result<RecordStore, ApiError> {
        fetch_records(self.source.as_ref())
            .await
            .map_err(|source| ApiError::Feed { context, source })
    }
}
