//! Locking subsystem for mutexfile.
//!
//! A single [`SharedLock`] serializes access to the shared resource. It is
//! owned by at most one worker thread at a time and records which thread
//! that is, so a release from any other thread is rejected with
//! [`MutexFileError::Ownership`](crate::error::MutexFileError::Ownership).
//!
//! # RAII Guards
//!
//! [`SharedLock::acquire`] returns a [`LockGuard`]. Releasing through the
//! guard happens either explicitly via [`LockGuard::release`] or on drop,
//! which also covers unwinding. If the drop-time release fails, a warning
//! is printed but the program does not crash.
//!
//! # Worker Identity
//!
//! Ownership is tracked by [`WorkerId`], a process-unique number handed
//! out lazily to each thread the first time it asks for its id.

mod guard;
mod id;
mod shared;


// Re-export public API
pub use guard::LockGuard;
pub use id::WorkerId;
pub use shared::SharedLock;
