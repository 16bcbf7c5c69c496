//! Exit code constants for the mutexfile binary.
//!
//! - 0: Success, including runs where a worker reported a write failure
//! - 1: Coordinator failure (a thread could not start, or a worker panicked)
//!
//! Failures handled inside a worker have no exit code of their own.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// The coordinator could not start or join a worker.
pub const COORDINATOR_FAILURE: i32 = 1;
