// Error definitions for the sharded map.

/// Errors raised while constructing a sharded map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("shard count must be greater than zero")]
    ZeroShards,
}
