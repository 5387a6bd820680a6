//! Scoped exclusive access to a single map entry.

use parking_lot::{MappedMutexGuard, MutexGuard};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

/// Accessor holds its shard's lock and points at one entry of that shard.
///
/// The lock is released when the accessor is dropped. While it lives, every
/// other key routed to the same shard waits, so keep it short. Taking a second
/// accessor for the same shard on the same thread deadlocks.
pub struct Accessor<'a, V> {
    shard: usize,
    value: MappedMutexGuard<'a, V>,
}

impl<'a, V> Accessor<'a, V> {
    /// Binds the entry for `key` inside an already locked shard, inserting
    /// `V::default()` if it is absent.
    pub(crate) fn bind<K>(shard: usize, items: MutexGuard<'a, HashMap<K, V>>, key: K) -> Self
    where
        K: Eq + Hash,
        V: Default,
    {
        let value = MutexGuard::map(items, |items| items.entry(key).or_default());
        Self { shard, value }
    }

    /// Index of the shard this accessor keeps locked.
    pub fn shard(&self) -> usize {
        self.shard
    }

    /// Replaces the entry's value, returning the previous one.
    pub fn replace(&mut self, value: V) -> V {
        std::mem::replace(&mut *self.value, value)
    }
}

impl<V> Deref for Accessor<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V> DerefMut for Accessor<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Accessor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("shard", &self.shard)
            .field("value", &*self.value)
            .finish()
    }
}
