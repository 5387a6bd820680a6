// Single-value synchronization.

pub mod synchronized;


pub use synchronized::{SyncAccess, Synchronized};
