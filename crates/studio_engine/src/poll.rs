use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use studio_core::JobStore;
use studio_logging::{studio_debug, studio_info};

use crate::client::ProviderClient;

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Bounded-attempt driver for pending result URLs.
///
/// Provider generation latency is variable; the attempt bound keeps the
/// caller from blocking indefinitely, and a manual re-trigger through
/// `poll_once` stays available after automatic attempts exhaust.
pub struct PollScheduler {
    client: Arc<dyn ProviderClient>,
    settings: PollSettings,
}

impl PollScheduler {
    pub fn new(client: Arc<dyn ProviderClient>, settings: PollSettings) -> Self {
        Self { client, settings }
    }

    /// Check every pending URL exactly once and return the ready subset.
    ///
    /// Mutates nothing; feeding the result into `JobStore::resolve` is the
    /// caller's responsibility, so the same primitive serves automatic and
    /// manual polling.
    pub async fn poll_once(&self, pending: &[String]) -> HashSet<String> {
        let mut ready = HashSet::new();
        for url in pending {
            if self.client.check_ready(url).await {
                ready.insert(url.clone());
            }
        }
        ready
    }

    /// Wait-then-poll up to `max_attempts` times, resolving progress into
    /// the store. Returns true as soon as at least one URL became ready;
    /// false immediately (without sleeping) when nothing is pending.
    ///
    /// Cooperative: the only suspension is the sleep between attempts, and
    /// abandoning the future there leaves URLs pending with no other side
    /// effects.
    pub async fn auto_poll(&self, store: &mut JobStore) -> bool {
        for attempt in 1..=self.settings.max_attempts {
            if !store.has_pending() {
                return false;
            }
            tokio::time::sleep(self.settings.delay).await;

            let pending: Vec<String> = store
                .current()
                .map(|job| job.result.pending.clone())
                .unwrap_or_default();
            studio_debug!(
                "poll attempt {attempt}/{}: {} url(s) pending",
                self.settings.max_attempts,
                pending.len()
            );

            let ready = self.poll_once(&pending).await;
            store.record_attempt();
            store.resolve(&ready);
            if !ready.is_empty() {
                studio_info!("{} url(s) became ready on attempt {attempt}", ready.len());
                return true;
            }
        }
        false
    }
}
