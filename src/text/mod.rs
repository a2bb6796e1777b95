//! Text normalization: mojibake repair and emoji extraction.
//!
//! Chat exports from Meta store UTF-8 bytes as if they were Latin-1, so
//! `😂` arrives as `ð\u009f\u0098\u0082`. This module turns such text
//! back into what the sender typed, and finds the emoji in it.
//!
//! - [`repair`] - best-effort repair, borrowed when nothing improved
//! - [`extract_emojis`] - every emoji occurrence, in order
//! - [`strip_emojis`] - blanks emoji before word splitting
//!
//! The static tables live in [`tables`] and can be swapped through
//! [`SubstitutionTable`], [`TableDetector`] and [`RawPatternDetector`].
//!
//! # Example
//!
//! ```rust
//! use chatlens::text::{extract_emojis, repair};
//!
//! let raw = "\u{e2}\u{9d}\u{a4}";
//! assert_eq!(repair(raw), "❤");
//! assert_eq!(extract_emojis(raw), vec!["❤"]);
//! ```

pub mod charset;
pub mod emoji;
pub mod repair;
pub mod tables;

pub use emoji::{
    EmojiDetector, EmojiExtractor, EmojiHit, RangeDetector, RawPatternDetector, TableDetector,
    extract_emojis, strip_emojis,
};
pub use repair::{
    RepairStrategy, Repaired, Repairer, SubstitutionTable, default_repairer, repair,
};
