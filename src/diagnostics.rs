//! Diagnostic side-channel for worker failures.
//!
//! A worker never propagates a failure; it reports it here and carries on
//! to release its lock. [`Console`] writes one line per report, to stdout
//! in the binary.

use crate::error::MutexFileError;
use crate::locks::WorkerId;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Where workers report failures they have handled.
pub trait Diagnostics: Send + Sync {
    fn worker_failed(&self, worker: WorkerId, error: &MutexFileError);
}

/// Reports one line per failure to a writer.
///
/// The writer is locked for each line, so reports from concurrent workers
/// never share a line.
#[derive(Debug)]
pub struct Console<W = io::Stdout> {
    out: Mutex<W>,
}

impl Console {
    /// Report to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Take back the writer, e.g. to inspect what was reported.
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Diagnostics for Console<W> {
    fn worker_failed(&self, worker: WorkerId, error: &MutexFileError) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", failure_line(worker, error)).and_then(|()| out.flush())
        {
            eprintln!("Warning: failed to report failure of Thread {}: {}", worker, e);
        }
    }
}

/// Format a single diagnostic line for a failed worker.
pub fn failure_line(worker: WorkerId, error: &MutexFileError) -> String {
    format!("Exception occurred on Thread [{}] : {}", worker, error)
}
