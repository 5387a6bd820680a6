//! Lock utilities with spin attempts.
//

use parking_lot::{Mutex, MutexGuard};
use std::hint;

/// Default spin budget for non-blocking shard access.
pub const ACCESS_LOCK_SPINS: usize = 8;

/// Tries to acquire a lock with spin attempts.
pub fn try_lock<T>(lock: &Mutex<T>, spins: usize) -> Option<MutexGuard<'_, T>> {
    for _ in 0..spins.max(1) {
        if let Some(guard) = lock.try_lock() {
            return Some(guard);
        }
        hint::spin_loop();
    }
    None
}
