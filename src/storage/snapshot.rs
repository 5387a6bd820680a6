//! Point-in-time copies of the sharded map.
//!
//! A snapshot is assembled shard by shard: lock shard `i`, copy it, release
//! it, move on to `i + 1`. Each shard's copy is atomic, the whole result is
//! not. A write that lands in an already copied shard while later shards are
//! still being copied is missing from the result, even if a write that
//! happened after it on a later shard is present. Once all writers have
//! stopped, the snapshot is exact.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use tracing::debug;

use super::map::ShardedMap;
use super::router::ShardKey;

/// Accumulates shard copies into one ordered map.
#[derive(Debug)]
pub struct SnapshotBuilder<K, V> {
    out: BTreeMap<K, V>,
    shards_copied: usize,
}

impl<K, V> SnapshotBuilder<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            out: BTreeMap::new(),
            shards_copied: 0,
        }
    }

    /// Copies every entry of one locked shard.
    pub fn copy_shard(&mut self, items: &HashMap<K, V>) {
        self.out
            .extend(items.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.shards_copied += 1;
    }

    pub fn shards_copied(&self) -> usize {
        self.shards_copied
    }

    pub fn finish(self) -> BTreeMap<K, V> {
        self.out
    }
}

impl<K, V> Default for SnapshotBuilder<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ShardedMap<K, V>
where
    K: ShardKey + Eq + Hash + Ord + Clone,
    V: Clone,
{
    /// Builds an ordered copy of all entries, one shard lock at a time.
    pub fn snapshot(&self) -> BTreeMap<K, V> {
        self.snapshot_with(|_| {})
    }

    /// Same as [`ShardedMap::snapshot`], calling `after_copy(i)` once shard `i`
    /// has been copied and unlocked.
    pub fn snapshot_with<F>(&self, mut after_copy: F) -> BTreeMap<K, V>
    where
        F: FnMut(usize),
    {
        let mut builder = SnapshotBuilder::new();
        for shard in self.shards() {
            {
                let items = shard.lock();
                builder.copy_shard(&items);
            }
            after_copy(shard.id());
        }

        debug!(
            component = "shardmap",
            event = "snapshot_built",
            shards = builder.shards_copied(),
            "snapshot built"
        );

        builder.finish()
    }
}
