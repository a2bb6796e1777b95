//! Output writers.
//!
//! - [`write_json`] / [`to_json`] - the [`StatisticsSnapshot`](crate::analysis::StatisticsSnapshot)
//!   as pretty JSON, readable back with [`from_json`]
//! - [`write_csv`] / [`to_csv`] - raw messages as CSV, independent of any
//!   snapshot - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::analysis::aggregate;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::output::{to_csv, write_json};
//! use chatlens::Message;
//!
//! let messages = vec![
//!     Message::new("Alice", "Hello!"),
//!     Message::new("Bob", "Hi there!"),
//! ];
//! let snapshot = aggregate(&messages, &AnalysisConfig::default());
//!
//! write_json(&snapshot, "stats.json")?;
//! let csv_string = to_csv(&messages)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, to_csv, write_csv};
pub use json_writer::{from_json, to_json, write_json};
