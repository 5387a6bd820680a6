//! Sharded concurrent map: routing, shards, scoped accessors and snapshots.

pub mod access;
pub mod error;
pub mod lock;
pub mod map;
pub mod router;
pub mod shard;
pub mod snapshot;

#[cfg(test)]
mod shard_test;
#[cfg(test)]
mod snapshot_test;

// Re-export main types
pub use access::Accessor;
pub use error::MapError;
pub use map::ShardedMap;
pub use router::{Hashed, ShardKey};
pub use shard::Shard;
pub use snapshot::SnapshotBuilder;
