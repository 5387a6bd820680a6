//! Shard implementation.
//

use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::hash::Hash;

use super::lock::try_lock;

/// Shard is an independent, separately locked segment of the sharded map.
///
/// The item map is only reachable through the shard's mutex.
pub struct Shard<K, V> {
    id: usize,
    items: Mutex<HashMap<K, V>>,
}

impl<K, V> Shard<K, V>
where
    K: Eq + Hash,
{
    /// Creates a new empty shard.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Gets the shard ID (its position in the map).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Blocks until the shard is exclusively locked.
    pub fn lock(&self) -> MutexGuard<'_, HashMap<K, V>> {
        self.items.lock()
    }

    /// Tries to lock the shard, giving up after `spins` attempts.
    pub fn try_lock(&self, spins: usize) -> Option<MutexGuard<'_, HashMap<K, V>>> {
        try_lock(&self.items, spins)
    }

    /// Gets the number of items.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Removes every entry and returns how many were dropped.
    pub fn clear(&self) -> usize {
        let mut items = self.items.lock();
        let removed = items.len();
        items.clear();
        removed
    }
}
