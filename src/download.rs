//! Artifact download with a bounded timeout and progress tracking
//!
//! A single request is made per fetch; there are no retries. Transport
//! failures and timeouts surface as [`FetchError::NetworkError`],
//! and non-2xx responses as [`FetchError::HttpError`]. The body is collected
//! in memory since nothing may touch the filesystem before verification.

use crate::error::FetchError;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Default bound on the whole request, connect through last body byte
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of artifact bytes
///
/// The pipeline is generic over this so tests can serve content from memory.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP(S) fetcher backed by reqwest
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    show_progress: bool,
}

impl HttpFetcher {
    /// Build a client whose requests fail after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("brewlet/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::NetworkError {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            show_progress: std::io::stderr().is_terminal(),
        })
    }

    /// Force the progress bar on or off
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    async fn download(&self, url: &str, pb: &ProgressBar) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(total) = response.content_length() {
            pb.set_length(total);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| network_error(url, &e))? {
            body.extend_from_slice(&chunk);
            pb.set_position(body.len() as u64);
        }

        Ok(body)
    }

    fn progress_bar(&self, url: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        let file_name = url.rsplit('/').next().unwrap_or(url);
        pb.set_message(format!("⬇ {file_name}"));
        pb
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "fetching artifact");
        let pb = self.progress_bar(url);

        let result = self.download(url, &pb).await;

        match &result {
            Ok(body) => {
                pb.finish_and_clear();
                tracing::debug!(url, bytes = body.len(), "fetched artifact");
            }
            Err(e) => {
                pb.abandon();
                tracing::debug!(url, error = %e, "fetch failed");
            }
        }

        result
    }
}

fn network_error(url: &str, err: &reqwest::Error) -> FetchError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    FetchError::NetworkError {
        url: url.to_string(),
        reason,
    }
}
