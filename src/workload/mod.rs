// Concurrent-update workloads and the lock speedup comparison.

pub mod speedup;
pub mod updates;


// Re-export main types
pub use speedup::{compare_speedup, SpeedupReport};
pub use updates::{run_concurrent_updates, Workload, WorkloadReport};
