//! The shared lock itself.

use super::guard::LockGuard;
use super::id::WorkerId;
use crate::error::{MutexFileError, Result};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Mutual-exclusion primitive with a recorded owner.
///
/// Unlike [`std::sync::Mutex`], ownership can be given back with
/// [`SharedLock::release`] independently of any guard, and that release is
/// checked against the calling thread. The lock is not reentrant: a thread
/// that acquires it twice without releasing blocks forever.
#[derive(Debug, Default)]
pub struct SharedLock {
    owner: Mutex<Option<WorkerId>>,
    freed: Condvar,
}

impl SharedLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock is free, then take ownership for the calling thread.
    ///
    /// There is no timeout and no fairness between waiters.
    pub fn acquire(&self) -> LockGuard<'_> {
        let caller = WorkerId::current();
        let mut owner = self.state();
        while owner.is_some() {
            owner = self
                .freed
                .wait(owner)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *owner = Some(caller);

        LockGuard::new(self, caller)
    }

    /// Give up ownership held by the calling thread.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The lock is free and one waiter (if any) was woken
    /// * `Err(MutexFileError::Ownership)` - The caller does not own the lock
    pub fn release(&self) -> Result<()> {
        let caller = WorkerId::current();
        let mut owner = self.state();
        if *owner != Some(caller) {
            return Err(MutexFileError::Ownership {
                caller,
                owner: *owner,
            });
        }
        *owner = None;
        drop(owner);

        self.freed.notify_one();
        Ok(())
    }

    /// Current owner, if any.
    #[cfg(test)]
    pub(crate) fn owner(&self) -> Option<WorkerId> {
        *self.state()
    }

    // The inner mutex only guards the owner slot and never runs caller
    // code, so a poisoned state is still consistent.
    fn state(&self) -> MutexGuard<'_, Option<WorkerId>> {
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
