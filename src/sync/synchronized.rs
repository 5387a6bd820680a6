//! Single value guarded by one lock.
//!
//! This is the one-shard, one-key case of [`crate::storage::ShardedMap`],
//! kept as its own type for shared buffers and hand-off queues.

use parking_lot::{Mutex, MutexGuard};

/// Scoped exclusive access to a [`Synchronized`] value.
pub type SyncAccess<'a, T> = MutexGuard<'a, T>;

#[derive(Debug, Default)]
pub struct Synchronized<T> {
    value: Mutex<T>,
}

impl<T> Synchronized<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }

    /// Blocks until the value is locked. The lock is released when the
    /// returned guard goes out of scope.
    pub fn access(&self) -> SyncAccess<'_, T> {
        self.value.lock()
    }

    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}
