#[cfg(test)]
mod tests {
    use crate::config::{
        new_test_config, Config, ConfigTrait, MAX_WORKLOAD_KEYS, MAX_WORKLOAD_THREADS,
    };

    const SAMPLE: &str = r#"
shardmap:
  env: prod
  logs:
    level: info
  runtime:
    num_cpus: 0
  map:
    shards: 64
  workload:
    threads: 3
    key_min: -25000
    key_max: 25000
    passes: 2
  words:
    page_size: 500
    key_words: [yangle, rocks]
"#;

    #[test]
    fn test_parse_full_config() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert!(cfg.is_prod());
        assert_eq!(cfg.shards(), 64);
        assert_eq!(cfg.runtime().num_cpus, 0);
        assert_eq!(cfg.logs().and_then(|l| l.level.as_deref()), Some("info"));

        let workload = cfg.workload().unwrap();
        assert_eq!(workload.threads, 3);
        assert_eq!((workload.key_min, workload.key_max), (-25_000, 25_000));

        let words = cfg.words().unwrap();
        assert_eq!(words.page_size(), 500);
        assert_eq!(words.key_words, vec!["yangle", "rocks"]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let cfg = Config::parse("shardmap:\n  env: dev\n").unwrap();
        assert!(!cfg.is_prod());
        assert_eq!(cfg.shards(), 100);
        assert_eq!(cfg.runtime().num_cpus, 0);
        assert!(cfg.workload().is_none());
    }

    #[test]
    fn test_zero_shards_rejected() {
        let err = Config::parse("shardmap:\n  env: dev\n  map:\n    shards: 0\n").unwrap_err();
        assert!(err.to_string().contains("map.shards"));
    }

    #[test]
    fn test_inverted_key_range_rejected() {
        let yaml = "shardmap:\n  env: dev\n  workload:\n    threads: 1\n    key_min: 5\n    key_max: -5\n    passes: 1\n";
        assert!(Config::parse(yaml).is_err());
    }

    #[test]
    fn test_full_i64_key_range_rejected() {
        let yaml = format!(
            "shardmap:\n  env: dev\n  workload:\n    threads: 1\n    key_min: {}\n    key_max: {}\n    passes: 1\n",
            i64::MIN,
            i64::MAX
        );
        let err = Config::parse(&yaml).unwrap_err();
        assert!(err.to_string().contains("key range"), "{}", err);
    }

    #[test]
    fn test_oversized_workload_rejected() {
        let threads = format!(
            "shardmap:\n  env: dev\n  workload:\n    threads: {}\n    key_min: 0\n    key_max: 10\n    passes: 1\n",
            MAX_WORKLOAD_THREADS + 1
        );
        assert!(Config::parse(&threads).unwrap_err().to_string().contains("workload.threads"));

        let passes = format!(
            "shardmap:\n  env: dev\n  workload:\n    threads: 1\n    key_min: 0\n    key_max: 10\n    passes: {}\n",
            usize::MAX
        );
        assert!(Config::parse(&passes).unwrap_err().to_string().contains("workload.passes"));

        let at_limit = format!(
            "shardmap:\n  env: dev\n  workload:\n    threads: {}\n    key_min: 1\n    key_max: {}\n    passes: 1\n",
            MAX_WORKLOAD_THREADS, MAX_WORKLOAD_KEYS
        );
        assert!(Config::parse(&at_limit).is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let yaml = "shardmap:\n  env: dev\n  words:\n    page_size: 0\n    key_words: []\n";
        assert!(Config::parse(yaml).is_err());
    }

    #[test]
    fn test_load_shipped_config() {
        let cfg = Config::load("cfg/shardmap.cfg.yaml").unwrap();
        assert_eq!(cfg.shards(), 100);
        assert_eq!(cfg.words().unwrap().key_words.len(), 4);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(Config::load("cfg/does-not-exist.yaml").is_err());
    }

    #[test]
    fn test_test_config() {
        let cfg = new_test_config();
        assert!(cfg.is_test());
        assert_eq!(cfg.shards(), 100);
    }
}
