//! Template download
//!
//! A single GET per template with no retry: a missing or partial template
//! makes every later step meaningless, so the caller treats any failure as
//! fatal. The body is received in full before the destination is touched.

use crate::error::{DownloadCause, Result, SplitError};
use reqwest::Client;
use std::fs;
use std::path::Path;

const USER_AGENT: &str = concat!("baseline-split/", env!("CARGO_PKG_VERSION"));

/// HTTP client for fetching published baseline templates
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SplitError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Download `url` to `dest`, creating the parent directory and overwriting any existing file
    ///
    /// Returns the number of bytes written.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SplitError::download(url, e))?;
            }
        }

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SplitError::download(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SplitError::download(url, DownloadCause::Status(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SplitError::download(url, e))?;

        fs::write(dest, &body).map_err(|e| SplitError::download(url, e))?;
        tracing::debug!("Saved {} bytes to {}", body.len(), dest.display());

        Ok(body.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("baseline-split/"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("Template").join("t.json");
        let fetcher = Fetcher::new().unwrap();

        // Port 9 on localhost (discard) is not expected to serve HTTP
        let err = fetcher
            .download("http://127.0.0.1:9/baseline.json", &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, SplitError::Download { .. }));
        assert!(!dest.exists());
    }
}
