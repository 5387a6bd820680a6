// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PROD: &str = "prod";
pub const TEST: &str = "test";

const DEFAULT_SHARDS: usize = 100;
const DEFAULT_PAGE_SIZE: usize = 10_000;

// Upper bounds for a workload run; every worker materializes the key range.
pub const MAX_WORKLOAD_THREADS: usize = 1024;
pub const MAX_WORKLOAD_KEYS: u64 = 1 << 26;
pub const MAX_WORKLOAD_PASSES: usize = 1_000_000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Root {
    #[serde(rename = "shardmap")]
    pub shardmap: Settings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub env: String,
    pub logs: Option<Logs>,
    pub runtime: Option<Runtime>,
    pub map: Option<Map>,
    pub workload: Option<Workload>,
    pub words: Option<Words>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Runtime {
    pub num_cpus: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Map {
    pub shards: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Workload {
    /// Worker threads, 0 means one per core.
    pub threads: usize,
    #[serde(rename = "key_min")]
    pub key_min: i64,
    #[serde(rename = "key_max")]
    pub key_max: i64,
    pub passes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Words {
    #[serde(rename = "page_size")]
    pub page_size: Option<usize>,
    #[serde(rename = "key_words")]
    pub key_words: Vec<String>,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    #[allow(dead_code)]
    fn is_test(&self) -> bool;
    fn runtime(&self) -> &Runtime;
    fn shards(&self) -> usize;
    fn workload(&self) -> Option<&Workload>;
    fn words(&self) -> Option<&Words>;
}

// Config type alias for convenience
pub type Config = Root;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.shardmap.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.shardmap.env == PROD
    }

    fn is_test(&self) -> bool {
        self.shardmap.env == TEST
    }

    fn runtime(&self) -> &Runtime {
        self.shardmap
            .runtime
            .as_ref()
            .unwrap_or(&Runtime { num_cpus: 0 })
    }

    fn shards(&self) -> usize {
        self.shardmap
            .map
            .as_ref()
            .map(|m| m.shards)
            .unwrap_or(DEFAULT_SHARDS)
    }

    fn workload(&self) -> Option<&Workload> {
        self.shardmap.workload.as_ref()
    }

    fn words(&self) -> Option<&Words> {
        self.shardmap.words.as_ref()
    }
}

impl Words {
    /// Lines per unit of work.
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("load config from {:?}", abs_path))
    }

    /// Parses and validates configuration from a YAML document.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Root = serde_yaml::from_str(data).context("unmarshal yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if let Some(ref map) = self.shardmap.map {
            if map.shards == 0 {
                anyhow::bail!("map.shards must be greater than zero");
            }
        }

        if let Some(ref workload) = self.shardmap.workload {
            if workload.key_min > workload.key_max {
                anyhow::bail!(
                    "workload.key_min ({}) is greater than workload.key_max ({})",
                    workload.key_min,
                    workload.key_max
                );
            }
            if workload.passes == 0 {
                anyhow::bail!("workload.passes must be greater than zero");
            }
            if workload.passes > MAX_WORKLOAD_PASSES {
                anyhow::bail!(
                    "workload.passes ({}) exceeds {}",
                    workload.passes,
                    MAX_WORKLOAD_PASSES
                );
            }
            if workload.threads > MAX_WORKLOAD_THREADS {
                anyhow::bail!(
                    "workload.threads ({}) exceeds {}",
                    workload.threads,
                    MAX_WORKLOAD_THREADS
                );
            }
            let keys = workload.key_max as i128 - workload.key_min as i128 + 1;
            if keys > MAX_WORKLOAD_KEYS as i128 {
                anyhow::bail!(
                    "workload key range [{}, {}] holds {} keys, more than {}",
                    workload.key_min,
                    workload.key_max,
                    keys,
                    MAX_WORKLOAD_KEYS
                );
            }
        }

        if let Some(ref words) = self.shardmap.words {
            if words.page_size == Some(0) {
                anyhow::bail!("words.page_size must be greater than zero");
            }
        }

        Ok(())
    }
}

// Test config is always available for integration tests
mod test_config;
#[allow(dead_code)]
pub use test_config::new_test_config;

#[cfg(test)]
mod config_test;
