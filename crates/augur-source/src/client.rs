//! Raw feed retrieval.

use augur_traits::{AugurError, Result};
use reqwest::Client;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a ticker's raw CSV feed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// An `http://` or `https://` URL.
    Remote(String),
    /// A file on the local filesystem.
    Local(PathBuf),
}

impl Location {
    /// Classify a registry location string.
    ///
    /// `http(s)://` prefixes are remote, `file://` prefixes and bare strings
    /// are local paths.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else if let Some(path) = trimmed.strip_prefix("file://") {
            Self::Local(PathBuf::from(path))
        } else {
            Self::Local(PathBuf::from(trimmed))
        }
    }
}

/// Append the query parameter that forces raw-file delivery.
///
/// Share links serve an HTML preview unless `download=1` is present.
#[must_use]
pub fn raw_download_url(url: &str) -> String {
    if url.contains("download=1") {
        url.to_string()
    } else if url.contains('?') {
        format!("{url}&download=1")
    } else {
        format!("{url}?download=1")
    }
}

/// Retrieves the raw text behind a [`Location`].
///
/// The pipeline is generic over this trait so tests can substitute an
/// in-memory source for the network.
pub trait Fetch: Send + Sync {
    /// Fetch the full body at `location` as text.
    ///
    /// # Errors
    ///
    /// Implementations report every failure as
    /// [`AugurError::DataUnavailable`].
    fn fetch_text(&self, location: &Location) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP and filesystem fetcher.
///
/// No retries and no timeout beyond the transport defaults; a failed fetch
/// is reported, not reattempted.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a fetcher around an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<String> {
        let url = raw_download_url(url);
        debug!(%url, "fetching remote feed");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AugurError::DataUnavailable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AugurError::DataUnavailable(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| AugurError::DataUnavailable(format!("unreadable response body: {e}")))
    }

    async fn read_local(path: &Path) -> Result<String> {
        debug!(path = %path.display(), "reading local feed");
        tokio::fs::read_to_string(path).await.map_err(|e| {
            AugurError::DataUnavailable(format!("cannot read {}: {e}", path.display()))
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch_text(&self, location: &Location) -> Result<String> {
        let text = match location {
            Location::Remote(url) => self.get(url).await?,
            Location::Local(path) => Self::read_local(path).await?,
        };
        debug!(bytes = text.len(), "fetched feed");
        Ok(text)
    }
}
