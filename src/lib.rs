#[path = "shared/profile/mod.rs"]
pub mod profile;

pub mod config;
pub mod storage;
pub mod sync;
pub mod wordcount;
pub mod workload;

pub use storage::{Accessor, Hashed, MapError, ShardKey, ShardedMap};
pub use sync::Synchronized;
