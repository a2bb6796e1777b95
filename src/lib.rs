//! # Chatlens
//!
//! A Rust library for analyzing Instagram and Messenger chat exports.
//!
//! ## Overview
//!
//! "Download your data" exports from Meta store text with a broken encoding:
//! every UTF-8 byte is written as a separate Latin-1 character, so `❤` turns
//! into `â¤`. Chatlens repairs that text, finds emojis in it (including ones
//! that survive only as byte patterns) and folds a whole conversation into a
//! single [`StatisticsSnapshot`](analysis::StatisticsSnapshot): word and
//! emoji rankings, activity timelines, conversation starters, double texts,
//! reactions, media, shared links and four engagement scores.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Exports of long chats are split over several files
//!     let messages = load_exports(&["message_1.json", "message_2.json"])?;
//!
//!     let snapshot = aggregate(&messages, &AnalysisConfig::default());
//!     println!("{} messages from {:?}", snapshot.total_messages, snapshot.participants);
//!
//!     write_json(&snapshot, "stats.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Text Repair
//!
//! ```rust
//! use chatlens::text::{extract_emojis, repair};
//!
//! assert_eq!(repair("\u{e2}\u{9d}\u{a4}"), "❤");
//! assert_eq!(extract_emojis("\u{e2}\u{9d}\u{a4}"), vec!["❤"]);
//! ```
//!
//! ## Module Structure
//!
//! - [`text`] - mojibake repair and emoji extraction
//! - [`analysis`] - the aggregation engine and everything it produces
//!   - [`aggregate`](analysis::aggregate), [`Aggregator`](analysis::Aggregator)
//!   - [`StatisticsSnapshot`](analysis::StatisticsSnapshot), [`InsightSummary`](analysis::InsightSummary)
//! - [`loader`] - reading export files
//! - [`output`] - JSON snapshot and CSV message writers
//! - [`cache`] - reusing a snapshot while the input is unchanged
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig), [`LoaderConfig`](config::LoaderConfig), [`CacheConfig`](config::CacheConfig)
//! - [`progress`] - progress reporting for chunked analysis
//! - [`message`] - the [`Message`] record
//! - [`error`] - unified error types ([`ChatlensError`], [`Result`])
//! - [`prelude`] - convenient re-exports

pub mod analysis;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod message;
pub mod output;
pub mod progress;
pub mod text;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;
    pub use crate::message::{MediaRef, Reaction, SharedLink};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Configuration
    pub use crate::config::{AnalysisConfig, CacheConfig, LoaderConfig};

    // Loading
    pub use crate::loader::{ExportLoader, load_export, load_exports};

    // Text normalization
    pub use crate::text::{extract_emojis, repair, strip_emojis};

    // Analysis
    pub use crate::analysis::{
        Aggregator, EngagementScores, InsightSummary, StatisticsSnapshot, aggregate,
        aggregate_chunked,
    };

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    pub use crate::output::{to_json, write_json};

    // Caching and progress
    pub use crate::cache::SnapshotCache;
    pub use crate::progress::{Progress, ProgressCallback};
}
