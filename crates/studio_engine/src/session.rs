use std::sync::Arc;

use bytes::Bytes;

use studio_core::{normalize, GenerationRequest, JobStore, JobView};
use studio_logging::studio_warn;

use crate::client::{ProviderClient, ProviderSettings, ReqwestProviderClient};
use crate::materialize::Materializer;
use crate::poll::{PollScheduler, PollSettings};
use crate::types::{DownloadError, ProviderError};

/// What a submission produced, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every extracted URL is already materialized.
    Ready,
    /// This many URLs must be polled before they are safe to fetch.
    Awaiting(usize),
    /// The response matched no known shape; no result was produced.
    /// Recoverable: the caller reports it, nothing is raised.
    NoData,
}

/// Single-session driver composing the provider client, the job store and
/// the poll scheduler. One logical caller at a time by contract.
pub struct StudioSession {
    client: Arc<dyn ProviderClient>,
    scheduler: PollScheduler,
    materializer: Materializer,
    store: JobStore,
    last_prompt: Option<String>,
    enhanced_prompt: Option<String>,
}

impl StudioSession {
    pub fn new(provider: ProviderSettings, poll: PollSettings) -> Self {
        Self::with_client(Arc::new(ReqwestProviderClient::new(provider)), poll)
    }

    /// Build a session around any client implementation.
    pub fn with_client(client: Arc<dyn ProviderClient>, poll: PollSettings) -> Self {
        let scheduler = PollScheduler::new(client.clone(), poll);
        Self {
            client,
            scheduler,
            materializer: Materializer::default(),
            store: JobStore::new(),
            last_prompt: None,
            enhanced_prompt: None,
        }
    }

    /// Submit a request and replace the active job with its normalized
    /// result. A prior job's unresolved pending URLs are abandoned here.
    pub async fn submit(
        &mut self,
        request: &GenerationRequest,
    ) -> Result<SubmitOutcome, ProviderError> {
        let raw = self.client.submit(request).await?;
        let result = normalize(&raw, request.requested_count as usize, request.synchronous);

        let outcome = if result.is_empty() {
            studio_warn!("provider response matched no known shape");
            SubmitOutcome::NoData
        } else if result.is_settled() {
            SubmitOutcome::Ready
        } else {
            SubmitOutcome::Awaiting(result.pending.len())
        };

        self.last_prompt = request.prompt().map(str::to_string);
        self.store.submit_result(result);
        Ok(outcome)
    }

    /// Bounded automatic polling of the active job's pending URLs.
    pub async fn auto_poll(&mut self) -> bool {
        self.scheduler.auto_poll(&mut self.store).await
    }

    /// Manual re-trigger: one immediate check pass, no delay.
    pub async fn refresh(&mut self) -> bool {
        let pending: Vec<String> = self
            .store
            .current()
            .map(|job| job.result.pending.clone())
            .unwrap_or_default();
        if pending.is_empty() {
            return false;
        }
        let ready = self.scheduler.poll_once(&pending).await;
        self.store.record_attempt();
        self.store.resolve(&ready);
        !ready.is_empty()
    }

    /// Read-only snapshot of the active job for rendering.
    pub fn view(&self) -> Option<JobView> {
        self.store.view()
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    /// Prompt of the last submitted request, when it carried one.
    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    pub fn enhanced_prompt(&self) -> Option<&str> {
        self.enhanced_prompt.as_deref()
    }

    /// Fetch the image body behind a resolved URL.
    pub async fn download(&self, url: &str) -> Result<Bytes, DownloadError> {
        self.materializer.fetch(url).await
    }

    /// Ask the provider to rewrite `prompt`; the rewrite is remembered so
    /// the collaborator can resubmit with it.
    pub async fn enhance_prompt(
        &mut self,
        credential: &str,
        prompt: &str,
    ) -> Result<Option<String>, ProviderError> {
        let enhanced = self.client.enhance_prompt(credential, prompt).await?;
        self.enhanced_prompt = enhanced.clone();
        Ok(enhanced)
    }
}
