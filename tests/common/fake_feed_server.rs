//! Fake data server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 that serves the configured feed text at `GET /data.txt`. Tests
//! can swap the body, force a status code or delay every response.
//!
//! # Example
//!
//! ```rust,no_run
//! # tokio_test::block_on(async {
//! use common::fake_feed_server::FakeFeedServer;
//!
//! let server = FakeFeedServer::start().await.unwrap();
//! server.set_body("3C8A01 05-03-25 08:00:00 21.4 0\n").await;
//!
//! // Point an HttpFeed at server.url()
//! let url = server.url();
//! # });
//! ```

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
struct FeedState {
    body: String,
    status: StatusCode,
    delay: Duration,
    hits: usize,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            body: String::new(),
            status: StatusCode::OK,
            delay: Duration::ZERO,
            hits: 0,
        }
    }
}

/// Handle to the running fake data server.
pub struct FakeFeedServer {
    addr: SocketAddr,
    state: Arc<Mutex<FeedState>>,
}

impl FakeFeedServer {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(FeedState::default()));

        let app = Router::new()
            .route("/data.txt", get(serve_feed))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Feed URL, e.g. `http://127.0.0.1:PORT/data.txt?file=logger.txt`.
    pub fn url(&self) -> String {
        format!("http://{}/data.txt?file=logger.txt", self.addr)
    }

    pub async fn set_body(&self, body: impl Into<String>) {
        self.state.lock().await.body = body.into();
    }

    pub async fn set_status(&self, status: StatusCode) {
        self.state.lock().await.status = status;
    }

    pub async fn set_delay(&self, delay: Duration) {
        self.state.lock().await.delay = delay;
    }

    /// Requests served so far.
    pub async fn hits(&self) -> usize {
        self.state.lock().await.hits
    }
}

async fn serve_feed(State(state): State<Arc<Mutex<FeedState>>>) -> impl IntoResponse {
    let (status, body, delay) = {
        let mut state = state.lock().await;
        state.hits += 1;
        (state.status, state.body.clone(), state.delay)
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    (status, body)
}
