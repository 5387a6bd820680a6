//! Wall-time measurement of a scope.

use std::time::{Duration, Instant};
use tracing::info;

/// Logs how long it lived when dropped.
///
/// ```ignore
/// {
///     let _timer = LogDuration::new("single lock");
///     run_updates(&map);
/// } // logs "single lock" with the elapsed time
/// ```
#[derive(Debug)]
pub struct LogDuration {
    label: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// Time since the guard was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            component = "profile",
            event = "duration",
            label = %self.label,
            elapsed = %humantime::format_duration(elapsed),
            elapsed_ms = elapsed.as_millis() as u64,
            "scope finished"
        );
    }
}
