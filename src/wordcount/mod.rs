//! Keyword frequency counting over line-based input.

pub mod explore;
pub mod stats;


// Re-export main types
pub use explore::{explore_key_words, explore_line, explore_lines, fetch_page, WordCountError};
pub use stats::Stats;
