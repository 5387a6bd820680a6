//! Single lock versus many locks under the same concurrent load.

use anyhow::Result;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{Config, ConfigTrait};
use crate::profile::LogDuration;
use crate::storage::ShardedMap;

use super::updates::{run_concurrent_updates, Workload, WorkloadReport};

/// Results of one comparison run.
#[derive(Debug, Clone, Copy)]
pub struct SpeedupReport {
    pub single: WorkloadReport,
    pub sharded: WorkloadReport,
    pub shards: usize,
}

impl SpeedupReport {
    /// How many times faster the sharded map was. `None` if the sharded run
    /// took no measurable time.
    pub fn ratio(&self) -> Option<f64> {
        if self.sharded.elapsed == Duration::ZERO {
            return None;
        }
        Some(self.single.elapsed.as_secs_f64() / self.sharded.elapsed.as_secs_f64())
    }
}

/// Runs the configured workload on a one-shard map and on a map with the
/// configured shard count.
pub fn compare_speedup(cfg: &Config, token: &CancellationToken) -> Result<SpeedupReport> {
    let plan = cfg
        .workload()
        .map(Workload::from_config)
        .ok_or_else(|| anyhow::anyhow!("workload section is not configured"))?;
    let shards = cfg.shards();

    let single = {
        let map: ShardedMap<i64, i64> = ShardedMap::new(1)?;
        let _timer = LogDuration::new("single lock");
        run_concurrent_updates(&map, &plan, token)
    };

    let sharded = {
        let map: ShardedMap<i64, i64> = ShardedMap::new(shards)?;
        let _timer = LogDuration::new(format!("{} locks", shards));
        run_concurrent_updates(&map, &plan, token)
    };

    let report = SpeedupReport {
        single,
        sharded,
        shards,
    };

    info!(
        component = "workload",
        event = "speedup_measured",
        shards = shards,
        ratio = ?report.ratio(),
        "sharded map speedup measured"
    );

    Ok(report)
}
