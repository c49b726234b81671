//! Keyed progress and cancellation state for running analyses.
//!
//! Entries exist only while a job runs: [`JobTracker::start`] creates one,
//! [`JobHandle::finish`] (or a stale sweep) removes it.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Progress reported when a job is registered.
pub const PROGRESS_STARTED: u8 = 5;
pub const PROGRESS_DONE: u8 = 100;

struct JobEntry {
    progress: u8,
    cancel: CancellationToken,
    started_at: Instant,
}

#[derive(Clone, Default)]
pub struct JobTracker {
    jobs: Arc<DashMap<String, JobEntry>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(DashMap::with_capacity(10)),
        }
    }

    /// Register a new job under a fresh id.
    pub fn start(&self) -> JobHandle {
        let id = uuid::Uuid::new_v4().to_string();
        let cancel = CancellationToken::new();
        self.jobs.insert(
            id.clone(),
            JobEntry {
                progress: PROGRESS_STARTED,
                cancel: cancel.clone(),
                started_at: Instant::now(),
            },
        );
        tracing::debug!("[JOB] Started {}", id);

        JobHandle {
            id,
            cancel,
            jobs: self.jobs.clone(),
        }
    }

    /// Current percentage, or `None` once the job is gone.
    pub fn progress(&self, job_id: &str) -> Option<u8> {
        self.jobs.get(job_id).map(|entry| entry.progress)
    }

    /// Request cancellation. Returns whether the job was known.
    pub fn cancel(&self, job_id: &str) -> bool {
        match self.jobs.get(job_id) {
            Some(entry) => {
                tracing::info!("[JOB] Cancelling {}", job_id);
                entry.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Remove a job entry. Returns whether it existed.
    pub fn finish(&self, job_id: &str) -> bool {
        self.jobs.remove(job_id).is_some()
    }

    /// Cancel and drop every job running longer than `max_age`.
    pub fn sweep_stale(&self, max_age: Duration) -> usize {
        let before = self.jobs.len();
        self.jobs.retain(|id, entry| {
            let keep = entry.started_at.elapsed() <= max_age;
            if !keep {
                tracing::warn!("[JOB] Dropping stale job {}", id);
                entry.cancel.cancel();
            }
            keep
        });
        before - self.jobs.len()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Owned by whoever runs the job. Progress writes go to the shared map.
pub struct JobHandle {
    id: String,
    cancel: CancellationToken,
    jobs: Arc<DashMap<String, JobEntry>>,
}

impl JobHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Record progress. Values never move backwards and are capped at 100.
    pub fn set_progress(&self, pct: u8) {
        if let Some(mut entry) = self.jobs.get_mut(&self.id) {
            entry.progress = entry.progress.max(pct.min(PROGRESS_DONE));
        }
    }

    pub fn progress(&self) -> Option<u8> {
        self.jobs.get(&self.id).map(|entry| entry.progress)
    }

    /// Clear the job's entry.
    pub fn finish(self) {
        if self.jobs.remove(&self.id).is_some() {
            tracing::debug!("[JOB] Finished {}", self.id);
        }
    }
}
