//! Error types for mutexfile.
//!
//! Uses thiserror for derive macros. Worker-level failures (`ResourceWrite`)
//! are handled inside the worker and never reach `main`; the remaining
//! variants describe coordinator-level problems.

use crate::exit_codes;
use crate::locks::WorkerId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mutexfile operations.
#[derive(Error, Debug)]
pub enum MutexFileError {
    /// Appending a line to the shared resource failed.
    #[error("failed to append to '{}': {}", path.display(), source)]
    ResourceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The shared lock was released by a thread that does not own it.
    #[error("Thread {} released the lock but {}", caller, describe_owner(owner))]
    Ownership {
        caller: WorkerId,
        owner: Option<WorkerId>,
    },

    /// The OS refused to start a worker thread.
    #[error("failed to start worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A worker thread unwound instead of terminating normally.
    #[error("{0} panicked")]
    WorkerPanicked(String),
}

fn describe_owner(owner: &Option<WorkerId>) -> String {
    match owner {
        Some(id) => format!("Thread {} owns it", id),
        None => "it is not held".to_string(),
    }
}

impl MutexFileError {
    /// Returns the exit code `main` uses when this error reaches it.
    ///
    /// Only `Spawn` and `WorkerPanicked` come out of a coordinator run.
    /// Write and ownership failures are handled inside the worker, so they
    /// share the coordinator code rather than carrying one of their own.
    pub fn exit_code(&self) -> i32 {
        match self {
            MutexFileError::Spawn(_)
            | MutexFileError::WorkerPanicked(_)
            | MutexFileError::ResourceWrite { .. }
            | MutexFileError::Ownership { .. } => exit_codes::COORDINATOR_FAILURE,
        }
    }
}

/// Result type alias for mutexfile operations.
pub type Result<T> = std::result::Result<T, MutexFileError>;
