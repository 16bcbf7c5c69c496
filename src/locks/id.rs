//! Runtime-assigned thread identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT: WorkerId = WorkerId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
}

/// Identifier of the thread a worker runs on.
///
/// Assigned on first use per thread and stable for the thread's lifetime.
/// Two live threads never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(u64);

impl WorkerId {
    /// Id of the calling thread.
    pub fn current() -> Self {
        CURRENT.with(|id| *id)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
