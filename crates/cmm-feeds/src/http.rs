//! HTTP feed source.
//!
//! One `GET` per fetch through a pooled `hyper_util` client. The timeout
//! covers connecting, the response head and the full body.

use async_trait::async_trait;
use cmm_core::config::FeedConfig;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header::{ACCEPT, CACHE_CONTROL};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

use crate::{FeedError, FeedSource};

/// Feed served over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    url: String,
    uri: Uri,
    timeout: Duration,
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl HttpFeed {
    /// Build a fetcher from the resolved feed configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let uri: Uri = config
            .url
            .parse()
            .map_err(|source| FeedError::InvalidUrl {
                url: config.url.clone(),
                source,
            })?;

        match uri.scheme_str() {
            Some("http") => {}
            other => return Err(FeedError::UnsupportedScheme(other.unwrap_or("").to_string())),
        }

        let client = Client::builder(TokioExecutor::new()).build_http();

        Ok(Self {
            timeout: config.timeout(),
            url: config.url,
            uri,
            client,
        })
    }

    async fn get(&self) -> Result<String, FeedError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.uri.clone())
            .header(ACCEPT, "text/plain, text/html;q=0.9, */*;q=0.5")
            .header(CACHE_CONTROL, "no-store")
            .body(Empty::<Bytes>::new())?;

        let response = self.client.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.into_body().collect().await?.to_bytes();
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch_text(&self) -> Result<String, FeedError> {
        tracing::debug!(url = %self.url, "fetching feed");
        tokio::time::timeout(self.timeout, self.get())
            .await
            .map_err(|_| FeedError::Timeout(self.timeout))?
    }

    fn describe(&self) -> &str {
        &self.url
    }
}
