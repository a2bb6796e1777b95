//! Configuration types for loading, analysis and caching.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. Every struct has sensible defaults
//! that reproduce the standard analysis, plus `with_*` builder methods.
//!
//! - [`AnalysisConfig`] - ranking caps, conversation gap, input ordering
//! - [`LoaderConfig`] - tolerance for malformed export entries
//! - [`CacheConfig`] - snapshot cache freshness window
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::new()
//!     .with_top_words(20)
//!     .with_sort_input(true);
//!
//! assert_eq!(config.top_words, 20);
//! assert_eq!(config.top_emojis, 50);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Twelve hours, in milliseconds.
pub const DEFAULT_CONVERSATION_GAP_MS: i64 = 12 * 60 * 60 * 1000;

/// Configuration for the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of entries kept in the ranked word list (default: 100)
    pub top_words: usize,

    /// Number of entries kept in the ranked emoji list (default: 50)
    pub top_emojis: usize,

    /// Silence after which the next message starts a new conversation,
    /// in milliseconds (default: 12 hours)
    pub conversation_gap_ms: i64,

    /// Sort a view of the input by timestamp before aggregating (default: false).
    ///
    /// When disabled the engine trusts that the caller already sorted the
    /// messages and only warns if it notices they are out of order.
    pub sort_input: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_words: 100,
            top_emojis: 50,
            conversation_gap_ms: DEFAULT_CONVERSATION_GAP_MS,
            sort_input: false,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the ranked word list.
    #[must_use]
    pub fn with_top_words(mut self, limit: usize) -> Self {
        self.top_words = limit;
        self
    }

    /// Sets the size of the ranked emoji list.
    #[must_use]
    pub fn with_top_emojis(mut self, limit: usize) -> Self {
        self.top_emojis = limit;
        self
    }

    /// Sets the conversation gap in milliseconds.
    #[must_use]
    pub fn with_conversation_gap_ms(mut self, gap_ms: i64) -> Self {
        self.conversation_gap_ms = gap_ms;
        self
    }

    /// Enables or disables sorting the input before aggregation.
    #[must_use]
    pub fn with_sort_input(mut self, enabled: bool) -> Self {
        self.sort_input = enabled;
        self
    }
}

/// Configuration for export loading.
///
/// # Example
///
/// ```rust
/// use chatlens::config::LoaderConfig;
///
/// let strict = LoaderConfig::new().with_skip_invalid(false);
/// assert!(!strict.skip_invalid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Skip entries of the `messages` array that are not objects instead of
    /// failing the whole file (default: true). Mistyped fields inside an
    /// object never fail; they read as absent.
    pub skip_invalid: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { skip_invalid: true }
    }
}

impl LoaderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip invalid entries.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

/// Configuration for the snapshot cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of a reusable snapshot (default: 24 hours)
    pub max_age: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl CacheConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the freshness window.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Freshness window as a chrono duration, saturating on overflow.
    pub fn max_age_delta(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::from_std(self.max_age).unwrap_or(chrono::TimeDelta::MAX)
    }
}
