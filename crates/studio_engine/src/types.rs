use std::fmt;

/// Submission or existence-check failure, surfaced to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderFailure,
    pub message: String,
}

impl ProviderError {
    pub(crate) fn new(kind: ProviderFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ProviderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    InvalidUrl,
    HttpStatus(u16),
    /// The provider rejected the request on content-moderation grounds;
    /// callers should present this distinctly from generic failure.
    ModerationBlocked,
    Timeout,
    Network,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderFailure::InvalidUrl => write!(f, "invalid url"),
            ProviderFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ProviderFailure::ModerationBlocked => write!(f, "blocked by content moderation"),
            ProviderFailure::Timeout => write!(f, "timeout"),
            ProviderFailure::Network => write!(f, "network error"),
        }
    }
}

/// Materialization failure for a resolved URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DownloadError {
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}
