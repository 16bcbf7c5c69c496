//! A single worker: acquire, write a fixed batch of lines, release.
//!
//! The worker takes the shared lock once and keeps it for the whole batch,
//! so its lines land in the resource as one contiguous block. A failed
//! append ends the batch early; the failure goes to the diagnostic
//! side-channel and the lock is released all the same. Nothing a worker
//! does is propagated to its caller as an error.

use crate::diagnostics::Diagnostics;
use crate::error::{MutexFileError, Result};
use crate::locks::{SharedLock, WorkerId};
use crate::resource::Resource;
use std::sync::Arc;

/// Number of lines each worker appends while holding the lock.
pub const ITERATIONS: usize = 10;

/// The line a worker appends on each iteration.
pub fn message_for(id: WorkerId) -> String {
    format!("Thread {} has the Mutex.", id)
}

/// What a worker did during its run.
#[derive(Debug)]
pub struct WorkerReport {
    /// Id of the thread the worker ran on.
    pub id: WorkerId,

    /// Lines successfully appended, at most [`ITERATIONS`].
    pub lines_written: usize,

    /// The failure that was reported to the side-channel, if any.
    pub failure: Option<MutexFileError>,
}

/// One unit of work sharing a lock, a resource and a side-channel with its peers.
pub struct Worker {
    lock: Arc<SharedLock>,
    resource: Arc<dyn Resource>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Worker {
    pub fn new(
        lock: Arc<SharedLock>,
        resource: Arc<dyn Resource>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            lock,
            resource,
            diagnostics,
        }
    }

    /// Run the worker to completion on the calling thread.
    ///
    /// Blocks until the lock is free. Once acquired, the lock is released
    /// before this returns, and by the guard's drop if the resource panics.
    ///
    /// The returned report is for callers that drive a worker directly.
    /// [`Coordinator`](crate::coordinator::Coordinator) discards it: failures
    /// have already gone to the diagnostic side-channel and the coordinator
    /// only waits for termination.
    pub fn run(&self) -> WorkerReport {
        let guard = self.lock.acquire();
        let id = guard.holder();

        let mut report = WorkerReport {
            id,
            lines_written: 0,
            failure: None,
        };

        if let Err(e) = self.write_batch(id, &mut report.lines_written) {
            self.diagnostics.worker_failed(id, &e);
            report.failure = Some(e);
        }

        if let Err(e) = guard.release() {
            self.diagnostics.worker_failed(id, &e);
            if report.failure.is_none() {
                report.failure = Some(e);
            }
        }

        report
    }

    fn write_batch(&self, id: WorkerId, written: &mut usize) -> Result<()> {
        let line = message_for(id);
        for _ in 0..ITERATIONS {
            self.resource.append_line(&line)?;
            *written += 1;
        }
        Ok(())
    }
}
