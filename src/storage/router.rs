//! Key to shard routing.
//!
//! Integer keys route by Euclidean modulo, so negative keys land on
//! non-negative indices: `-1` over 3 shards goes to shard 2, the same shard
//! as `2` and `5`. Other key types must be wrapped in [`Hashed`], which routes
//! by a seedless XXH3 digest of the key's `Hash` output.

use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::Xxh3;

/// Deterministic mapping of a key to a shard index.
///
/// Equal keys must always produce the same index for the same shard count.
/// Implementations must return a value in `[0, shard_count)`; callers never
/// pass a zero `shard_count`.
pub trait ShardKey {
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_signed_shard_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_index(&self, shard_count: usize) -> usize {
                    (*self as i128).rem_euclid(shard_count as i128) as usize
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_shard_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_index(&self, shard_count: usize) -> usize {
                    (*self as u128 % shard_count as u128) as usize
                }
            }
        )*
    };
}

impl_signed_shard_key!(i8, i16, i32, i64, i128, isize);
impl_unsigned_shard_key!(u8, u16, u32, u64, u128, usize);

/// Wrapper that routes an arbitrary `Hash` key by its XXH3 digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hashed<K>(pub K);

impl<K> Hashed<K> {
    pub fn into_inner(self) -> K {
        self.0
    }
}

impl<K> From<K> for Hashed<K> {
    fn from(key: K) -> Self {
        Self(key)
    }
}

impl<K: Hash> ShardKey for Hashed<K> {
    fn shard_index(&self, shard_count: usize) -> usize {
        let mut hasher = Xxh3::new();
        self.0.hash(&mut hasher);
        (hasher.finish() % shard_count as u64) as usize
    }
}

/// Routes `key` over `shard_count` shards.
#[inline]
pub fn shard_index<K: ShardKey + ?Sized>(key: &K, shard_count: usize) -> usize {
    debug_assert!(shard_count > 0, "shard count must be positive");
    key.shard_index(shard_count)
}
