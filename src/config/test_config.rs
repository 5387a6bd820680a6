use super::{Config, Root, Settings};

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Root {
        shardmap: Settings {
            env: super::TEST.to_string(),
            logs: Some(super::Logs {
                level: Some("debug".to_string()),
            }),
            runtime: Some(super::Runtime { num_cpus: 4 }),
            map: Some(super::Map { shards: 100 }),
            workload: Some(super::Workload {
                threads: 4,
                key_min: -2_500,
                key_max: 2_500,
                passes: 2,
            }),
            words: Some(super::Words {
                page_size: Some(2),
                key_words: vec![
                    "yangle".to_string(),
                    "rocks".to_string(),
                    "sucks".to_string(),
                    "all".to_string(),
                ],
            }),
        },
    }
}
