use serde::Serialize;

/// Canonical `{ready, pending}` URL partition, independent of the provider's
/// raw response shape. The two lists are disjoint; a URL lives in exactly one
/// of them at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GenerationResult {
    /// URLs confirmed downloadable.
    pub ready: Vec<String>,
    /// URLs that must pass an existence check before fetching.
    pub pending: Vec<String>,
}

impl GenerationResult {
    pub fn new(ready: Vec<String>, pending: Vec<String>) -> Self {
        Self { ready, pending }
    }

    /// True when normalization produced no URLs at all (the recoverable
    /// "no data" outcome, distinct from "still pending").
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty() && self.pending.is_empty()
    }

    /// True when nothing is awaiting materialization.
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }
}
