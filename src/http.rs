use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::{HarvestError, Result};

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Plain (non-browser) HTTP access. A non-2xx status is an error for both calls.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET a page and return its body as text.
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// GET a resource and return its body as a chunk stream.
    async fn fetch_stream(&self, url: &str) -> Result<ByteStream>;
}

/// Process-wide reqwest client, shared as `Arc<dyn Fetcher>` so every fetch reuses one pool.
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(cfg: &HttpConfig) -> Result<Self> {
        let timeout = cfg.timeout();
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| HarvestError::transport("<client builder>", e))?;
        Ok(Self { client, timeout })
    }

    async fn get(&self, url: &str, whole_request_timeout: bool) -> Result<reqwest::Response> {
        let mut req = self.client.get(url);
        if whole_request_timeout { req = req.timeout(self.timeout); }
        let resp = req.send().await.map_err(|e| HarvestError::transport(url, e))?;
        let status = resp.status();
        debug!(url, status = status.as_u16(), "GET");
        if !status.is_success() {
            return Err(HarvestError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(resp)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self.get(url, true).await?;
        resp.text().await.map_err(|e| HarvestError::transport(url, e))
    }

    async fn fetch_stream(&self, url: &str) -> Result<ByteStream> {
        // Large media bodies: only the idle read timeout applies once streaming starts.
        let resp = self.get(url, false).await?;
        let owned = url.to_string();
        let stream = resp.bytes_stream().map(move |chunk| chunk.map_err(|e| HarvestError::transport(&owned, e)));
        Ok(Box::pin(stream))
    }
}
