//! Network access
//!
//! [`Fetcher`] is the seam between document logic and the network. The
//! engine runs synchronously inside one request, so the trait is blocking;
//! [`HttpFetcher`] implements it on `reqwest::blocking` with per-call
//! timeouts.

use std::io::Read;
use std::time::Duration;

use url::Url;

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// Status and declared MIME type from a header-only request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub status: u16,
    pub content_type: Option<String>,
}

impl Probe {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A fully downloaded response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    /// URL after redirects; relative links in the body resolve against it.
    pub final_url: Url,
    pub bytes: Vec<u8>,
}

/// Blocking HTTP collaborator used by detection and extraction.
pub trait Fetcher: Send + Sync {
    /// Header-only request with the short probe timeout.
    fn head(&self, url: &Url) -> Result<Probe>;

    /// First `limit` bytes of the body; stops reading once the limit is reached.
    fn get_prefix(&self, url: &Url, limit: usize) -> Result<Vec<u8>>;

    /// Whole body. A non-success status is an error.
    fn get(&self, url: &Url) -> Result<Fetched>;
}

/// [`Fetcher`] backed by a `reqwest` blocking client.
///
/// Must be built and dropped outside of an async context; the server keeps
/// one for its lifetime and only calls it from blocking worker threads.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    probe_timeout: Duration,
    fetch_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .connect_timeout(config.probe_timeout())
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            probe_timeout: config.probe_timeout(),
            fetch_timeout: config.fetch_timeout(),
        })
    }

    fn send_get(&self, url: &Url) -> Result<reqwest::blocking::Response> {
        let resp = self
            .client
            .get(url.clone())
            .timeout(self.fetch_timeout)
            .send()
            .map_err(|e| Error::fetch(url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

fn content_type_of(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

impl Fetcher for HttpFetcher {
    fn head(&self, url: &Url) -> Result<Probe> {
        let resp = self
            .client
            .head(url.clone())
            .timeout(self.probe_timeout)
            .send()
            .map_err(|e| Error::fetch(url, e))?;
        Ok(Probe {
            status: resp.status().as_u16(),
            content_type: content_type_of(resp.headers()),
        })
    }

    fn get_prefix(&self, url: &Url, limit: usize) -> Result<Vec<u8>> {
        let resp = self.send_get(url)?;
        let mut bytes = Vec::with_capacity(limit);
        resp.take(limit as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::fetch(url, e))?;
        Ok(bytes)
    }

    fn get(&self, url: &Url) -> Result<Fetched> {
        let resp = self.send_get(url)?;
        let final_url = resp.url().clone();
        let bytes = resp.bytes().map_err(|e| Error::fetch(url, e))?.to_vec();
        tracing::debug!(url = %url, final_url = %final_url, bytes = bytes.len(), "fetched document body");
        Ok(Fetched { final_url, bytes })
    }
}
