use std::time::Duration;

use bytes::Bytes;

use crate::types::DownloadError;

/// Fetches the image body behind a resolved URL, independent of polling.
#[derive(Debug, Clone)]
pub struct Materializer {
    timeout: Duration,
}

impl Default for Materializer {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl Materializer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Download the raw bytes. No retry: repeating a large image download
    /// is the caller's decision, not this component's.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, DownloadError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| DownloadError::Network(err.to_string()))?;
        let response = client.get(url).send().await.map_err(map_download_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus(status.as_u16()));
        }
        response.bytes().await.map_err(map_download_error)
    }
}

fn map_download_error(err: reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        return DownloadError::Timeout;
    }
    DownloadError::Network(err.to_string())
}
