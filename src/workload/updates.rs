//! Concurrent increment workload over a sharded map.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Workload as WorkloadConfig;
use crate::storage::ShardedMap;

/// Plan for one concurrent-update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub threads: usize,
    pub keys: RangeInclusive<i64>,
    pub passes: usize,
}

impl Workload {
    /// Builds a plan from config. Zero threads means one per core.
    pub fn from_config(cfg: &WorkloadConfig) -> Self {
        let threads = if cfg.threads == 0 {
            num_cpus::get()
        } else {
            cfg.threads
        };
        Self {
            threads,
            keys: cfg.key_min..=cfg.key_max,
            passes: cfg.passes,
        }
    }

    /// Number of distinct keys the plan touches, saturating at `u64::MAX`
    /// for the full `i64` range.
    pub fn key_count(&self) -> u64 {
        if self.keys.is_empty() {
            return 0;
        }
        let span = *self.keys.end() as i128 - *self.keys.start() as i128 + 1;
        u64::try_from(span).unwrap_or(u64::MAX)
    }

    /// Increments the plan performs. Saturates instead of wrapping.
    pub fn total_operations(&self) -> u64 {
        let rounds = u64::try_from(self.threads.saturating_mul(self.passes)).unwrap_or(u64::MAX);
        self.key_count().saturating_mul(rounds)
    }

    /// Final value every key holds after an uninterrupted run on an empty map.
    pub fn expected_value(&self) -> i64 {
        i64::try_from(self.threads.saturating_mul(self.passes)).unwrap_or(i64::MAX)
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadReport {
    pub elapsed: Duration,
    pub operations: u64,
    pub completed: bool,
}

/// Runs `plan` against `map`: each worker shuffles the key range with its own
/// seed and increments every key once per pass. Workers check `token` before
/// each pass.
pub fn run_concurrent_updates(
    map: &ShardedMap<i64, i64>,
    plan: &Workload,
    token: &CancellationToken,
) -> WorkloadReport {
    let operations = AtomicU64::new(0);
    let start = Instant::now();

    thread::scope(|s| {
        for seed in 0..plan.threads {
            let operations = &operations;
            s.spawn(move || {
                let mut keys: Vec<i64> = plan.keys.clone().collect();
                keys.shuffle(&mut StdRng::seed_from_u64(seed as u64));

                for _ in 0..plan.passes {
                    if token.is_cancelled() {
                        return;
                    }
                    for &key in &keys {
                        *map.access(key) += 1;
                    }
                    operations.fetch_add(keys.len() as u64, Ordering::Relaxed);
                }
            });
        }
    });

    let operations = operations.load(Ordering::Relaxed);
    let report = WorkloadReport {
        elapsed: start.elapsed(),
        operations,
        completed: operations == plan.total_operations(),
    };

    info!(
        component = "workload",
        event = "updates_finished",
        shards = map.shard_count(),
        threads = plan.threads,
        operations = report.operations,
        completed = report.completed,
        elapsed = %humantime::format_duration(report.elapsed),
        "concurrent updates finished"
    );

    report
}
