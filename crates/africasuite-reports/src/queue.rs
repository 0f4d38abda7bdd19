//! Priority queue of report generation jobs.
//!
//! Holds job state only; [`crate::service::ReportService`] runs the workers
//! that claim and complete jobs. Ordering: higher priority first, FIFO within
//! a priority. A pending job is never overtaken by a later job of equal or
//! lower priority.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::{Mutex, Notify};
use tracing::{info, warn};
use uuid::Uuid;

use africasuite_core::models::job::{GenerationJob, JobPriority, JobStatus};
use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::report::{Artifact, GeneratedReport};
use africasuite_core::models::template::OutputFormat;

use crate::clock::Clock;
use crate::error::ReportError;

/// What a worker reports back for a job it ran.
pub type JobOutcome = Result<(GeneratedReport, Arc<Artifact>), String>;

#[derive(Debug, PartialEq, Eq)]
struct QueuedJob {
    priority: JobPriority,
    seq: u64,
    id: Uuid,
}

impl Ord for QueuedJob {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: higher priority wins, then the lower (earlier) sequence.
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct JobRecord {
    job: GenerationJob,
    seq: u64,
    artifact: Option<Arc<Artifact>>,
}

#[derive(Default)]
struct QueueState {
    jobs: HashMap<Uuid, JobRecord>,
    pending: BinaryHeap<QueuedJob>,
    next_seq: u64,
}

pub struct JobQueue {
    state: Mutex<QueueState>,
    notify: Notify,
    clock: Arc<dyn Clock>,
}

impl JobQueue {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            notify: Notify::new(),
            clock,
        }
    }

    /// Add a pending job and wake one idle worker.
    pub async fn enqueue(
        &self,
        template_id: &str,
        parameters: ParameterValues,
        format: OutputFormat,
        priority: JobPriority,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let job = GenerationJob {
            id,
            template_id: template_id.to_string(),
            parameters,
            format,
            priority,
            status: JobStatus::Pending,
            created_at: self.clock.now(),
            started_at: None,
            completed_at: None,
            report: None,
            error: None,
        };

        {
            let mut state = self.state.lock().await;
            let seq = state.next_seq;
            state.next_seq += 1;
            state.pending.push(QueuedJob { priority, seq, id });
            state.jobs.insert(
                id,
                JobRecord {
                    job,
                    seq,
                    artifact: None,
                },
            );
        }
        self.notify.notify_one();

        info!(job_id = %id, template_id, priority = %priority, "job enqueued");
        id
    }

    pub async fn status(&self, id: Uuid) -> Result<GenerationJob, ReportError> {
        self.state
            .lock()
            .await
            .jobs
            .get(&id)
            .map(|r| r.job.clone())
            .ok_or(ReportError::JobNotFound(id))
    }

    /// The artifact of a completed job; `None` for any other state.
    pub async fn result(&self, id: Uuid) -> Result<Option<Arc<Artifact>>, ReportError> {
        let state = self.state.lock().await;
        let record = state.jobs.get(&id).ok_or(ReportError::JobNotFound(id))?;
        Ok(record.artifact.clone())
    }

    /// Move the next eligible job to `processing` and return it.
    pub async fn claim_next(&self) -> Option<GenerationJob> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        while let Some(next) = state.pending.pop() {
            let Some(record) = state.jobs.get_mut(&next.id) else {
                // Pruned while still queued.
                continue;
            };
            if record.job.status != JobStatus::Pending {
                continue;
            }
            record.job.status = JobStatus::Processing;
            record.job.started_at = Some(now);
            info!(job_id = %next.id, "job processing");
            return Some(record.job.clone());
        }
        None
    }

    /// Wait until a job can be claimed.
    pub async fn next_job(&self) -> GenerationJob {
        loop {
            if let Some(job) = self.claim_next().await {
                return job;
            }
            self.notify.notified().await;
        }
    }

    /// Record the outcome of a processing job. Returns `false` (and leaves the
    /// job untouched) when the job is unknown or not processing.
    pub async fn complete(&self, id: Uuid, outcome: JobOutcome) -> bool {
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let Some(record) = state.jobs.get_mut(&id) else {
            warn!(job_id = %id, "completion for unknown job ignored");
            return false;
        };

        let next = if outcome.is_ok() {
            JobStatus::Completed
        } else {
            JobStatus::Failed
        };
        if !record.job.status.can_transition_to(next) {
            warn!(
                job_id = %id,
                from = %record.job.status,
                to = %next,
                "illegal job transition ignored"
            );
            return false;
        }

        record.job.status = next;
        record.job.completed_at = Some(now);
        match outcome {
            Ok((report, artifact)) => {
                record.job.report = Some(report);
                record.artifact = Some(artifact);
                info!(job_id = %id, "job completed");
            }
            Err(message) => {
                warn!(job_id = %id, error = %message, "job failed");
                record.job.error = Some(message);
            }
        }
        true
    }

    /// Every known job, newest first.
    pub async fn jobs(&self) -> Vec<GenerationJob> {
        let state = self.state.lock().await;
        let mut records: Vec<&JobRecord> = state.jobs.values().collect();
        records.sort_by(|a, b| b.seq.cmp(&a.seq));
        records.into_iter().map(|r| r.job.clone()).collect()
    }

    pub async fn pending_count(&self) -> usize {
        self.state
            .lock()
            .await
            .jobs
            .values()
            .filter(|r| r.job.status == JobStatus::Pending)
            .count()
    }

    /// Forget finished jobs completed before `cutoff`. Returns how many were dropped.
    pub async fn prune_finished(&self, cutoff: Timestamp) -> usize {
        let mut state = self.state.lock().await;
        let before = state.jobs.len();
        state.jobs.retain(|_, r| {
            !(r.job.status.is_terminal() && r.job.completed_at.is_some_and(|t| t < cutoff))
        });
        before - state.jobs.len()
    }
}
