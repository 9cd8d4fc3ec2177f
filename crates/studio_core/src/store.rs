use std::collections::HashSet;
use std::time::SystemTime;

use serde::Serialize;

use crate::GenerationResult;

/// The mutable record tracked for the active generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub result: GenerationResult,
    pub created_at: SystemTime,
    pub attempts_made: u32,
}

/// Session-scoped store holding at most one active job.
///
/// Submitting a new result replaces the job wholesale, abandoning any
/// unresolved pending URLs of the previous one. Single writer by contract;
/// `&mut self` enforces it in-process, and a multi-driver deployment must
/// add its own lock around mutation.
#[derive(Debug, Default)]
pub struct JobStore {
    active: Option<Job>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active job with a freshly normalized result, resetting
    /// the attempt counter.
    pub fn submit_result(&mut self, result: GenerationResult) {
        self.active = Some(Job {
            result,
            created_at: SystemTime::now(),
            attempts_made: 0,
        });
    }

    pub fn current(&self) -> Option<&Job> {
        self.active.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|job| !job.result.pending.is_empty())
    }

    /// Promote every pending URL found in `ready_now`, preserving the
    /// relative order of the URLs that stay pending. URLs never pending in
    /// the active job are ignored.
    pub fn resolve(&mut self, ready_now: &HashSet<String>) {
        let Some(job) = self.active.as_mut() else {
            return;
        };
        let mut still_pending = Vec::with_capacity(job.result.pending.len());
        for url in job.result.pending.drain(..) {
            if ready_now.contains(&url) {
                job.result.ready.push(url);
            } else {
                still_pending.push(url);
            }
        }
        job.result.pending = still_pending;
    }

    /// Record one poll attempt against the active job.
    pub fn record_attempt(&mut self) {
        if let Some(job) = self.active.as_mut() {
            job.attempts_made += 1;
        }
    }

    /// Read-only snapshot for the UI collaborator.
    pub fn view(&self) -> Option<JobView> {
        self.active.as_ref().map(|job| JobView {
            ready: job.result.ready.clone(),
            pending: job.result.pending.clone(),
            attempts_made: job.attempts_made,
            awaiting: !job.result.pending.is_empty(),
        })
    }
}

/// Snapshot of the active job handed across the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobView {
    pub ready: Vec<String>,
    pub pending: Vec<String>,
    pub attempts_made: u32,
    pub awaiting: bool,
}
