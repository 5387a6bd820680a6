//! Paged keyword counting.
//!
//! Input is read and cut into pages of lines on the blocking pool; every page
//! is counted there as an independent task and the partial [`Stats`] are
//! merged in submission order.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::stats::Stats;

/// Page tasks the reader may run ahead of the merge.
const PENDING_PAGES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WordCountError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Counts the key words of one line. Tokens are split on whitespace and must
/// match a key word exactly.
pub fn explore_line(key_words: &BTreeSet<String>, line: &str) -> Stats {
    let mut result = Stats::default();
    for word in line.split_whitespace() {
        if key_words.contains(word) {
            result.record(word);
        }
    }
    result
}

pub fn explore_lines<S: AsRef<str>>(key_words: &BTreeSet<String>, lines: &[S]) -> Stats {
    let mut result = Stats::default();
    for line in lines {
        result += explore_line(key_words, line.as_ref());
    }
    result
}

/// Reads up to `size` lines, without their line terminators.
pub fn fetch_page<R: BufRead>(size: usize, input: &mut R) -> std::io::Result<Vec<String>> {
    let mut page = Vec::with_capacity(size);
    let mut line = String::new();
    while page.len() < size {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        page.push(std::mem::take(&mut line));
    }
    Ok(page)
}

/// Counts key words over the whole input, one blocking task per page.
///
/// The input is read on the blocking pool as well; page tasks are handed
/// back over a channel and merged as they arrive, so the calling runtime
/// worker is never stalled by slow input.
pub async fn explore_key_words<R>(
    key_words: Arc<BTreeSet<String>>,
    mut input: R,
    page_size: usize,
) -> Result<Stats>
where
    R: BufRead + Send + 'static,
{
    if page_size == 0 {
        return Err(WordCountError::ZeroPageSize.into());
    }

    let (tx, mut rx) = mpsc::channel::<JoinHandle<Stats>>(PENDING_PAGES);
    let reader = tokio::task::spawn_blocking(move || -> std::io::Result<usize> {
        let mut pages = 0;
        loop {
            let page = fetch_page(page_size, &mut input)?;
            if page.is_empty() {
                return Ok(pages);
            }
            let key_words = Arc::clone(&key_words);
            let task = tokio::task::spawn_blocking(move || explore_lines(&key_words, &page));
            if tx.blocking_send(task).is_err() {
                // Receiver is gone, nobody merges the remaining pages.
                return Ok(pages);
            }
            pages += 1;
        }
    });

    let mut result = Stats::default();
    while let Some(task) = rx.recv().await {
        result += task.await.context("page worker failed")?;
    }

    let pages = reader
        .await
        .context("input reader failed")?
        .context("read input page")?;

    debug!(
        component = "wordcount",
        event = "explored",
        pages = pages,
        words = result.word_frequencies.len(),
        "key words explored"
    );

    Ok(result)
}
