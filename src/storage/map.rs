//! Sharded concurrent map with per-shard locking.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::access::Accessor;
use super::error::MapError;
use super::router::{self, ShardKey};
use super::shard::Shard;

/// ShardedMap partitions its keys over a fixed number of independently
/// locked shards.
///
/// Operations on keys living in different shards never wait on each other.
/// Operations on the same shard are serialized by that shard's lock with no
/// fairness guarantee. The map never takes more than one shard lock at a time.
pub struct ShardedMap<K, V> {
    shard_count: NonZeroUsize,
    shards: Box<[Shard<K, V>]>,
}

impl<K, V> ShardedMap<K, V>
where
    K: ShardKey + Eq + Hash,
{
    /// Creates a map with `shard_count` empty shards.
    ///
    /// A zero shard count is rejected instead of silently falling back to a
    /// single shard.
    pub fn new(shard_count: usize) -> Result<Self, MapError> {
        let shard_count = NonZeroUsize::new(shard_count).ok_or(MapError::ZeroShards)?;
        Ok(Self::with_shards(shard_count))
    }

    /// Creates a map from an already validated shard count.
    pub fn with_shards(shard_count: NonZeroUsize) -> Self {
        let shards = (0..shard_count.get()).map(Shard::new).collect();

        debug!(
            component = "shardmap",
            event = "map_created",
            shards = shard_count.get(),
            "sharded map created"
        );

        Self {
            shard_count,
            shards,
        }
    }

    /// Gets the number of shards. Fixed for the map's lifetime.
    pub fn shard_count(&self) -> usize {
        self.shard_count.get()
    }

    /// Gets the index of the shard `key` routes to.
    pub fn shard_index(&self, key: &K) -> usize {
        router::shard_index(key, self.shard_count.get())
    }

    /// Gets the shard for a given key.
    pub fn shard(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.shard_index(key)]
    }

    /// Blocks until the key's shard is locked and returns exclusive access to
    /// the key's entry, creating a default value if the key is new.
    pub fn access(&self, key: K) -> Accessor<'_, V>
    where
        V: Default,
    {
        let idx = self.shard_index(&key);
        Accessor::bind(idx, self.shards[idx].lock(), key)
    }

    /// Like [`ShardedMap::access`] but gives up after `spins` failed lock
    /// attempts instead of blocking.
    pub fn try_access(&self, key: K, spins: usize) -> Option<Accessor<'_, V>>
    where
        V: Default,
    {
        let idx = self.shard_index(&key);
        let items = self.shards[idx].try_lock(spins)?;
        Some(Accessor::bind(idx, items, key))
    }

    /// Walks over all shards in index order, holding one shard lock at a time.
    /// Stops before the next shard once `token` is cancelled.
    pub fn walk_shards<F>(&self, token: &CancellationToken, mut f: F)
    where
        F: FnMut(usize, &mut HashMap<K, V>),
    {
        for shard in self.shards.iter() {
            if token.is_cancelled() {
                return;
            }
            let mut items = shard.lock();
            f(shard.id(), &mut items);
        }
    }

    /// Gets the number of items in one shard, or `None` for an out of range index.
    pub fn shard_len(&self, idx: usize) -> Option<usize> {
        self.shards.get(idx).map(Shard::len)
    }

    /// Gets the number of items.
    ///
    /// Shards are counted one after another, so under concurrent inserts the
    /// total may not match any single instant.
    pub fn len(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(Shard::is_empty)
    }

    /// Clears all shards, one at a time. Returns the number of removed items.
    pub fn clear(&self) -> usize {
        self.shards.iter().map(Shard::clear).sum()
    }

    pub(crate) fn shards(&self) -> &[Shard<K, V>] {
        &self.shards
    }
}

impl<K, V> fmt::Debug for ShardedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedMap")
            .field("shard_count", &self.shard_count)
            .finish_non_exhaustive()
    }
}
