//! Error types for feed sources.

use std::time::Duration;

use hyper::http::uri::InvalidUri;
use hyper::StatusCode;
use thiserror::Error;

/// Why a feed fetch produced no records.
///
/// A fetch either returns the whole body or one of these; partial reads are
/// never surfaced.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The configured URL does not parse.
    #[error("invalid feed url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: InvalidUri,
    },

    /// Only plain `http` endpoints are supported.
    #[error("unsupported feed url scheme {0:?} (expected http)")]
    UnsupportedScheme(String),

    #[error("failed to build feed request: {0}")]
    Request(#[from] hyper::http::Error),

    /// Connection refused, DNS failure, reset, …
    #[error("feed transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The server answered with a non-2xx status.
    #[error("feed responded with status {0}")]
    Status(StatusCode),

    /// The connection failed while the body was being read.
    #[error("failed to read feed body: {0}")]
    Body(#[from] hyper::Error),

    #[error("feed did not respond within {0:?}")]
    Timeout(Duration),
}

impl FeedError {
    /// True for failures of the remote side (as opposed to local
    /// misconfiguration). Callers report these as "data unavailable".
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            FeedError::Transport(_) | FeedError::Status(_) | FeedError::Body(_) | FeedError::Timeout(_)
        )
    }
}
