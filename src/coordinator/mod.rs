//! Starting and joining the workers.
//!
//! The coordinator owns the one [`SharedLock`] and hands each worker its
//! own reference to it, the resource and the diagnostic side-channel. Both
//! workers are started before either is joined, so they run concurrently
//! and contend for the lock. The coordinator never sees a worker's handled
//! failures; it only waits for termination.
//!
//! # Panics in Workers
//!
//! A worker that panics still gives up the lock when its guard drops
//! during unwinding, so its peer is not blocked. The panic is reported by
//! [`Coordinator::join`] as [`MutexFileError::WorkerPanicked`].

use crate::diagnostics::{Console, Diagnostics};
use crate::error::{MutexFileError, Result};
use crate::locks::SharedLock;
use crate::resource::{AppendFile, Resource};
use crate::worker::Worker;
use std::sync::Arc;
use std::thread::{self, JoinHandle};


/// Number of workers started per run.
pub const WORKER_COUNT: usize = 2;

/// The file the workers append to, relative to the working directory.
pub const TARGET_FILE: &str = "test.txt";

/// Handle to a started worker thread.
#[derive(Debug)]
pub struct WorkerHandle {
    name: String,
    handle: JoinHandle<()>,
}

/// Owns the shared state for one set of workers.
pub struct Coordinator {
    lock: Arc<SharedLock>,
    resource: Arc<dyn Resource>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Coordinator {
    /// Create a coordinator with a fresh lock for the given resource.
    pub fn new(resource: Arc<dyn Resource>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            lock: Arc::new(SharedLock::new()),
            resource,
            diagnostics,
        }
    }

    /// Build a worker that shares this coordinator's lock and resource.
    pub fn worker(&self) -> Worker {
        Worker::new(
            self.lock.clone(),
            self.resource.clone(),
            self.diagnostics.clone(),
        )
    }

    /// Start `worker` on a new named thread.
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerHandle)` - The worker is running
    /// * `Err(MutexFileError::Spawn)` - The thread could not be created
    pub fn start(worker: Worker, name: impl Into<String>) -> Result<WorkerHandle> {
        let name = name.into();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                worker.run();
            })
            .map_err(MutexFileError::Spawn)?;

        Ok(WorkerHandle { name, handle })
    }

    /// Block until the worker behind `handle` has terminated.
    pub fn join(handle: WorkerHandle) -> Result<()> {
        let WorkerHandle { name, handle } = handle;
        handle
            .join()
            .map_err(|_| MutexFileError::WorkerPanicked(name))
    }

    /// Start all workers, then join every one that started.
    ///
    /// Returns the first start or join error, but only after every started
    /// worker has been joined.
    pub fn run(&self) -> Result<()> {
        let mut handles = Vec::with_capacity(WORKER_COUNT);
        let mut first_error = None;

        for n in 1..=WORKER_COUNT {
            match Self::start(self.worker(), format!("worker-{}", n)) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    first_error = Some(e);
                    break;
                }
            }
        }

        for handle in handles {
            if let Err(e) = Self::join(handle)
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Run both workers against [`TARGET_FILE`], reporting failures to the console.
pub fn run_default() -> Result<()> {
    Coordinator::new(
        Arc::new(AppendFile::new(TARGET_FILE)),
        Arc::new(Console::stdout()),
    )
    .run()
}
