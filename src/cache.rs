//! Local snapshot cache.
//!
//! Aggregation is idempotent, so a snapshot computed earlier can be reused
//! as long as the input did not change. An entry is reused only when the
//! message count and the [`AnalysisConfig`] match the ones it was computed
//! with, and it is younger than the freshness window
//! ([`CacheConfig::max_age`], 24 hours by default).
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::analysis::aggregate;
//! use chatlens::cache::SnapshotCache;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::loader::load_exports;
//!
//! let messages = load_exports(&["message_1.json"])?;
//! let cache = SnapshotCache::new("chatlens-cache.json");
//! let config = AnalysisConfig::default();
//!
//! let snapshot = match cache.get_fresh(messages.len(), &config) {
//!     Some(snapshot) => snapshot,
//!     None => {
//!         let snapshot = aggregate(&messages, &config);
//!         cache.store(&snapshot, messages.len(), &config)?;
//!         snapshot
//!     }
//! };
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::StatisticsSnapshot;
use crate::config::{AnalysisConfig, CacheConfig};
use crate::error::{ChatlensError, Result};

/// A stored snapshot with the metadata needed to judge its freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSnapshot {
    pub snapshot: StatisticsSnapshot,
    /// Number of input messages the snapshot was computed from.
    pub message_count: usize,
    /// Configuration the snapshot was computed with.
    #[serde(default)]
    pub config: AnalysisConfig,
    pub computed_at: DateTime<Utc>,
}

impl CachedSnapshot {
    pub fn new(
        snapshot: StatisticsSnapshot,
        message_count: usize,
        config: AnalysisConfig,
        computed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            snapshot,
            message_count,
            config,
            computed_at,
        }
    }

    /// Returns `true` if the entry matches `message_count` and `config` and
    /// is younger than `max_age` at `now`.
    pub fn is_fresh(
        &self,
        message_count: usize,
        config: &AnalysisConfig,
        now: DateTime<Utc>,
        max_age: TimeDelta,
    ) -> bool {
        self.message_count == message_count
            && self.config == *config
            && now.signed_duration_since(self.computed_at) < max_age
    }
}

/// Snapshot cache backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
    config: CacheConfig,
}

impl SnapshotCache {
    /// Creates a cache at `path` with the default freshness window.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, CacheConfig::default())
    }

    pub fn with_config(path: impl Into<PathBuf>, config: CacheConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Reads the cached entry. `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<CachedSnapshot>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ChatlensError::cache(&self.path, format!("unreadable entry: {e}")))
    }

    /// Stores `snapshot` computed from `message_count` messages with
    /// `config`, stamped with the current time.
    pub fn store(
        &self,
        snapshot: &StatisticsSnapshot,
        message_count: usize,
        config: &AnalysisConfig,
    ) -> Result<()> {
        self.store_at(snapshot, message_count, config, Utc::now())
    }

    /// Stores `snapshot` with an explicit timestamp.
    pub fn store_at(
        &self,
        snapshot: &StatisticsSnapshot,
        message_count: usize,
        config: &AnalysisConfig,
        computed_at: DateTime<Utc>,
    ) -> Result<()> {
        let entry = CachedSnapshot::new(snapshot.clone(), message_count, config.clone(), computed_at);
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut writer, &entry)?;
        writer.flush()?;
        debug!(path = %self.path.display(), message_count, "stored snapshot");
        Ok(())
    }

    /// Returns the cached snapshot if it is fresh for `message_count` and
    /// was computed with `config`.
    pub fn get_fresh(&self, message_count: usize, config: &AnalysisConfig) -> Option<StatisticsSnapshot> {
        self.get_fresh_at(message_count, config, Utc::now())
    }

    /// Like [`get_fresh`](Self::get_fresh), judged at `now`.
    ///
    /// Missing, unreadable, stale and mismatched entries all yield `None`.
    pub fn get_fresh_at(
        &self,
        message_count: usize,
        config: &AnalysisConfig,
        now: DateTime<Utc>,
    ) -> Option<StatisticsSnapshot> {
        let entry = match self.load() {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "ignoring snapshot cache");
                return None;
            }
        };
        if entry.is_fresh(message_count, config, now, self.config.max_age_delta()) {
            debug!(path = %self.path.display(), "using cached snapshot");
            Some(entry.snapshot)
        } else {
            debug!(
                cached = entry.message_count,
                message_count,
                same_config = entry.config == *config,
                computed_at = %entry.computed_at,
                "cached snapshot is stale"
            );
            None
        }
    }

    /// Deletes the cache file if it exists.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
