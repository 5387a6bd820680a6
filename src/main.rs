// Main entrypoint for the shardmap tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shardmap::config::{Config, ConfigTrait};
use shardmap::profile::LogDuration;
use shardmap::wordcount::explore_key_words;
use shardmap::workload::compare_speedup;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const CONFIG_PATH: &str = "cfg/shardmap.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/shardmap.cfg.local.yaml";

/// shardmap - sharded concurrent map workloads
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a single-lock map against the configured shard count
    Bench,
    /// Count configured key words in a file (stdin if omitted)
    Words {
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

/// Resolves the worker thread count, 0 meaning all available cores.
fn set_max_num_cpus(cfg: &Config) -> usize {
    let cores = cfg.runtime().num_cpus;
    if cores == 0 {
        let cores = num_cpus::get();
        info!(
            component = "main",
            event = "num_cpus_configured",
            num_cpus = cores,
            "Available cores value configured (using all available cores)"
        );
        cores
    } else {
        warn!(
            component = "main",
            event = "num_cpus_configured",
            num_cpus = cores,
            "Available cores value configured"
        );
        cores
    }
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        return Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path));
    }

    match Config::load(PathBuf::from(CONFIG_PATH_LOCAL)) {
        Ok(cfg) => Ok(cfg),
        Err(_) => Config::load(PathBuf::from(CONFIG_PATH))
            .with_context(|| format!("failed to load config from {}", CONFIG_PATH)),
    }
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_ref())
        .map(|s| s.as_str())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cfg = load_cfg(args.cfg)?;

    // Logger needs the loaded config
    configure_logger(&cfg);
    info!(component = "config", event = "load_success", "config loaded");

    let workers = set_max_num_cpus(&cfg);

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?
        .block_on(async_main(cfg, args.command))
}

async fn async_main(cfg: Config, command: Command) -> Result<()> {
    let shutdown_token = CancellationToken::new();

    let signal_token = shutdown_token.clone();
    tokio::task::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(
                component = "main",
                event = "os_signal",
                signal = "SIGINT",
                "cancellation started"
            );
            signal_token.cancel();
        }
    });

    let _total = LogDuration::new("total");

    match command {
        Command::Bench => {
            let token = shutdown_token.clone();
            let report = tokio::task::spawn_blocking(move || compare_speedup(&cfg, &token))
                .await
                .context("bench worker failed")??;
            println!(
                "single lock: {}\n{} locks: {}\nspeedup: {}",
                humantime::format_duration(report.single.elapsed),
                report.shards,
                humantime::format_duration(report.sharded.elapsed),
                report
                    .ratio()
                    .map(|r| format!("{:.2}x", r))
                    .unwrap_or_else(|| "n/a".to_string())
            );
        }
        Command::Words { input } => {
            let words = cfg
                .words()
                .context("words section is not configured")?;
            let key_words: Arc<BTreeSet<String>> = Arc::new(words.key_words.iter().cloned().collect());
            let page_size = words.page_size();

            let stats = match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("open input file {:?}", path))?;
                    explore_key_words(key_words, BufReader::new(file), page_size).await?
                }
                None => {
                    explore_key_words(key_words, BufReader::new(io::stdin()), page_size).await?
                }
            };

            let out = serde_json::to_string_pretty(&stats.word_frequencies)
                .context("encode word frequencies")?;
            println!("{}", out);
        }
    }

    shutdown_token.cancel();
    Ok(())
}
