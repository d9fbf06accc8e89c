//! cmm-api — JSON endpoints over the derived projections.
//!
//! Every `/api/*` route fetches the feed fresh, parses it and runs a single
//! derivation. A failed fetch becomes `500 {"error": "..."}` with a
//! route-specific message; the underlying cause is only logged.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/realtime", get(handlers::realtime))
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/timeline", get(handlers::timeline))
        .route("/api/analytics", get(handlers::analytics))
        .route("/api/elements", get(handlers::elements))
        .route("/api/mass-concrete", get(handlers::mass_concrete))
        .route("/api/pours", get(handlers::pours))
        .route("/api/sensors", get(handlers::sensors))
        .route("/api/reports", get(handlers::reports))
        .route("/api/calibration", get(handlers::calibration))
        .route("/api/ota", get(handlers::ota))
        .route("/api/admin", get(handlers::admin))
        .route("/api/maturity", get(handlers::maturity))
        .route("/api/compare", get(handlers::compare))
        .with_state(state)
}

/// Serve on `listener` until `cancel` fires, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, source = state.source(), "api listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
}
