//! Page retrieval.

use crate::consts::USER_AGENT;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use std::time::Duration;
use tracing::instrument;
use url::Url;

/// Default per-request timeout of [`HttpFetcher`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves the HTML body behind a URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// [`Fetch`] over HTTP(S) with `reqwest`.
///
/// Any non-success status is an [`ErrorKind::HttpStatus`] error; redirects are
/// followed by the client.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}
impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(skip_all, fields(url = %url, status, bytes))]
    async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .or_raise(|| ErrorKind::Network(url.to_string()))?;
        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());
        if !status.is_success() {
            exn::bail!(ErrorKind::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await.or_raise(|| ErrorKind::Network(url.to_string()))?;
        tracing::Span::current().record("bytes", body.len());
        tracing::debug!("Fetched page");
        Ok(body)
    }
}

/// Serves canned pages keyed by URL; an unknown URL is a 404.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct FixtureFetcher {
    pages: std::collections::HashMap<String, String>,
    requests: std::sync::Mutex<Vec<String>>,
}
#[cfg(test)]
impl FixtureFetcher {
    pub(crate) fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
#[cfg(test)]
#[async_trait]
impl Fetch for FixtureFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(html) => Ok(html.clone()),
            None => exn::bail!(ErrorKind::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
