//! Background scoring thread with stale-response rejection.
//!
//! Each submission carries the version of the parameter state it was
//! issued for. The owner bumps its [`VersionTracker`] whenever that state
//! is replaced, so answers for superseded states can be recognised and
//! dropped.

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::client::{HabitabilityService, score_or_zero};
use crate::request::{HabitabilityRequest, HabitabilityResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestVersion(pub u64);

/// Monotonic version of the active parameter state.
#[derive(Debug, Default)]
pub struct VersionTracker {
    current: u64,
}

impl VersionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the state replaced and return the new version.
    pub fn bump(&mut self) -> RequestVersion {
        self.current += 1;
        RequestVersion(self.current)
    }

    pub fn current(&self) -> RequestVersion {
        RequestVersion(self.current)
    }

    pub fn is_current(&self, version: RequestVersion) -> bool {
        version.0 == self.current
    }
}

/// A finished scoring call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredResponse {
    pub version: RequestVersion,
    pub result: HabitabilityResult,
    /// `false` when the call failed and `result` is the zero fallback.
    pub succeeded: bool,
}

struct Job {
    version: RequestVersion,
    request: HabitabilityRequest,
}

/// Owns the scoring thread. Dropping it closes the job queue and lets the
/// thread exit after any call in flight.
pub struct HabitabilityWorker {
    jobs: Option<Sender<Job>>,
    results: Receiver<ScoredResponse>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl HabitabilityWorker {
    pub fn spawn(service: Box<dyn HabitabilityService>) -> std::io::Result<Self> {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        let handle = std::thread::Builder::new()
            .name("habitability".into())
            .spawn(move || {
                for job in job_rx {
                    let (result, succeeded) = score_or_zero(service.as_ref(), &job.request);
                    let response = ScoredResponse {
                        version: job.version,
                        result,
                        succeeded,
                    };
                    if result_tx.send(response).is_err() {
                        break;
                    }
                }
                tracing::debug!("Habitability worker stopped");
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
        })
    }

    /// Queue a scoring call. Returns `false` if the thread is gone.
    pub fn submit(&self, version: RequestVersion, request: HabitabilityRequest) -> bool {
        tracing::debug!(version = version.0, "Submitting habitability request");
        self.jobs
            .as_ref()
            .is_some_and(|jobs| jobs.send(Job { version, request }).is_ok())
    }

    /// Next finished call, current or not.
    pub fn try_recv(&self) -> Option<ScoredResponse> {
        match self.results.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drain finished calls and keep the newest one still matching
    /// `tracker`. Stale answers are logged and discarded.
    pub fn latest_current(&self, tracker: &VersionTracker) -> Option<ScoredResponse> {
        let mut latest = None;
        while let Some(response) = self.try_recv() {
            if tracker.is_current(response.version) {
                latest = Some(response);
            } else {
                tracing::debug!(
                    version = response.version.0,
                    current = tracker.current().0,
                    "Discarding stale habitability response"
                );
            }
        }
        latest
    }
}

impl Drop for HabitabilityWorker {
    fn drop(&mut self) {
        self.jobs.take();
        // A call in flight may sit on a network timeout; do not block on it.
        self.handle.take();
    }
}
