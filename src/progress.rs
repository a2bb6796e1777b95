//! Progress reporting for chunked aggregation.
//!
//! [`aggregate_chunked`](crate::analysis::aggregate_chunked) pushes a
//! [`Progress`] after each chunk. Reporting never changes the result.
//!
//! # Example
//!
//! ```rust
//! use chatlens::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|update: Progress| {
//!     let done = update.percentage().unwrap_or(0.0);
//!     println!("{done:.0}% after {} chunks", update.chunks_completed);
//! });
//!
//! for chunk in 1..=4usize {
//!     callback(Progress::new(chunk * 250, Some(1000)).with_chunks(chunk));
//! }
//! ```

use std::sync::Arc;

/// Progress of a long-running operation over a list of messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Number of messages processed so far.
    pub items_processed: usize,

    /// Total messages to process, if known.
    pub total_items: Option<usize>,

    /// Number of chunks completed so far.
    pub chunks_completed: usize,
}

impl Progress {
    /// Progress after `items_processed` of `total_items` messages.
    pub fn new(items_processed: usize, total_items: Option<usize>) -> Self {
        Self {
            items_processed,
            total_items,
            chunks_completed: 0,
        }
    }

    /// Sets the number of completed chunks.
    #[must_use]
    pub fn with_chunks(mut self, chunks_completed: usize) -> Self {
        self.chunks_completed = chunks_completed;
        self
    }

    /// Share of messages processed, from 0 to 100. An empty input counts as
    /// fully processed. `None` without a known total.
    ///
    /// ```rust
    /// use chatlens::progress::Progress;
    ///
    /// assert_eq!(Progress::new(50, Some(200)).percentage(), Some(25.0));
    /// assert_eq!(Progress::new(50, None).percentage(), None);
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        let total = self.total_items?;
        if total == 0 {
            return Some(100.0);
        }
        Some(self.items_processed as f64 * 100.0 / total as f64)
    }

    /// Returns whether every item has been processed.
    pub fn is_complete(&self) -> bool {
        self.total_items
            .is_some_and(|total| self.items_processed >= total)
    }

    /// Returns the number of items left, if the total is known.
    pub fn remaining(&self) -> Option<usize> {
        self.total_items
            .map(|total| total.saturating_sub(self.items_processed))
    }
}

/// Thread-safe callback receiving [`Progress`] updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Callback that ignores every update.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Callback printing one line per update to stderr, used by `--progress`.
///
/// ```rust
/// use chatlens::progress::{Progress, stderr_progress};
///
/// let report = stderr_progress();
/// // Prints "Analyzed 500/1000 messages (50.0%)"
/// report(Progress::new(500, Some(1000)));
/// ```
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        if let (Some(total), Some(pct)) = (progress.total_items, progress.percentage()) {
            eprintln!(
                "Analyzed {}/{} messages ({:.1}%)",
                progress.items_processed, total, pct
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_percentage() {
        assert_eq!(Progress::new(250, Some(1000)).percentage(), Some(25.0));
        assert_eq!(Progress::new(0, Some(0)).percentage(), Some(100.0));
        assert_eq!(Progress::new(7, None).percentage(), None);
    }

    #[test]
    fn test_completion_and_remaining() {
        assert!(Progress::new(10, Some(10)).is_complete());
        assert!(!Progress::new(5, Some(10)).is_complete());
        assert!(!Progress::new(5, None).is_complete());
        assert_eq!(Progress::new(3, Some(10)).remaining(), Some(7));
        assert_eq!(Progress::new(12, Some(10)).remaining(), Some(0));
        assert_eq!(Progress::new(3, None).remaining(), None);
    }

    #[test]
    fn test_with_chunks() {
        let update = Progress::new(3, Some(10)).with_chunks(2);
        assert_eq!(update.chunks_completed, 2);
        assert_eq!(Progress::new(3, Some(10)).chunks_completed, 0);
    }

    #[test]
    fn test_callbacks_receive_updates() {
        no_progress()(Progress::default());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |update: Progress| {
            sink.lock().unwrap().push(update.items_processed);
        });
        for done in [100, 200, 250] {
            callback(Progress::new(done, Some(250)));
        }
        assert_eq!(*seen.lock().unwrap(), vec![100, 200, 250]);
    }
}
