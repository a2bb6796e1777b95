//! Conversation statistics.
//!
//! This module contains:
//! - [`engine`] - single-pass [`Aggregator`], [`aggregate`], [`aggregate_chunked`]
//! - [`snapshot`] - the [`StatisticsSnapshot`] record and its parts
//! - [`words`] - tokenizer and stopwords
//! - [`ranking`] - [`FrequencyTable`] with first-seen tie breaking
//! - [`scores`] - [`EngagementScores`]
//! - [`links`] - shared link domains
//! - [`summary`] - [`InsightSummary`] for external text generation
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::analysis::{aggregate, InsightSummary};
//! use chatlens::config::AnalysisConfig;
//! use chatlens::Message;
//!
//! let messages = vec![
//!     Message::new("Alice", "hello 😂").with_timestamp_ms(1_705_314_600_000),
//!     Message::new("Bob", "hi!").with_timestamp_ms(1_705_314_700_000),
//! ];
//! let snapshot = aggregate(&messages, &AnalysisConfig::default());
//! let summary = InsightSummary::build(&snapshot, &messages);
//!
//! assert_eq!(summary.total_messages, 2);
//! ```

pub mod engine;
pub mod links;
pub mod ranking;
pub mod scores;
pub mod snapshot;
pub mod summary;
pub mod words;

pub use engine::{Aggregator, aggregate, aggregate_chunked};
pub use links::domain_of;
pub use ranking::FrequencyTable;
pub use scores::{EngagementScores, ScoreInputs};
pub use snapshot::{
    CountMap, DayCount, EmojiCount, LinkRecord, MediaTotals, MonthSummary, NestedCountMap,
    StatisticsSnapshot, WordCount,
};
pub use summary::{InsightSummary, SampleMessage};
pub use words::{Tokens, tokenize};
