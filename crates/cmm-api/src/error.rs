//! Error responses.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cmm_feeds::FeedError;
use serde_json::json;
use thiserror::Error;

/// Failure of one request. The body is always `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The feed could not be fetched. Only `context` reaches the client.
    #[error("{context}")]
    Feed {
        context: &'static str,
        #[source]
        source: FeedError,
    },

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Feed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Feed { context, source } = &self {
            tracing::warn!(error = %source, unreachable = source.is_unreachable(), "{context}");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
