//! RAII lock guard implementation.

use super::id::WorkerId;
use super::shared::SharedLock;
use crate::error::Result;
use std::marker::PhantomData;

/// RAII guard for ownership of a [`SharedLock`].
///
/// When dropped, ownership is released automatically.
/// If release fails, a warning is printed but no panic occurs.
///
/// The guard is `!Send`: ownership belongs to the acquiring thread, and
/// releasing from any other thread is an ownership error.
#[derive(Debug)]
pub struct LockGuard<'a> {
    lock: &'a SharedLock,

    /// Thread that acquired the lock.
    holder: WorkerId,

    /// Whether the lock has been released manually.
    released: bool,

    _not_send: PhantomData<*const ()>,
}

impl<'a> LockGuard<'a> {
    pub(super) fn new(lock: &'a SharedLock, holder: WorkerId) -> Self {
        Self {
            lock,
            holder,
            released: false,
            _not_send: PhantomData,
        }
    }

    /// Thread that holds the lock through this guard.
    pub fn holder(&self) -> WorkerId {
        self.holder
    }

    /// Manually release the lock.
    ///
    /// This is useful when the caller wants to handle a release error
    /// explicitly instead of having it printed as a warning on drop.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.lock.release()
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.lock.release()
        {
            eprintln!(
                "Warning: failed to release lock held by Thread {}: {}",
                self.holder, e
            );
        }
    }
}
