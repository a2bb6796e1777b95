//! Loading of "download your data" chat exports.
//!
//! An export file is a JSON document with a `messages` array (Instagram and
//! Messenger use the same shape). Exports of long chats are split over
//! several files (`message_1.json`, `message_2.json`, ...), newest first.
//! [`load_exports`] concatenates them and sorts the result so that it can be
//! handed straight to [`aggregate`](crate::analysis::aggregate).
//!
//! # Example
//!
//! ```rust
//! use chatlens::loader::parse_export_str;
//!
//! let json = r#"{
//!     "participants": [{"name": "Alice"}, {"name": "Bob"}],
//!     "messages": [
//!         {"sender_name": "Bob", "timestamp_ms": 1705314660000, "content": "hey"},
//!         {"sender_name": "Alice", "timestamp_ms": 1705314600000, "content": "hi"}
//!     ]
//! }"#;
//! let messages = parse_export_str(json)?;
//! assert_eq!(messages.len(), 2);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::error::{ChatlensError, ParseErrorKind, Result};
use crate::message::{Message, sort_chronologically};

const FORMAT: &str = "Messenger JSON";

/// Loader for JSON chat exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::config::LoaderConfig;
/// use chatlens::loader::ExportLoader;
///
/// let loader = ExportLoader::with_config(LoaderConfig::new().with_skip_invalid(false));
/// let messages = loader.load_all(&["message_1.json", "message_2.json"])?;
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportLoader {
    config: LoaderConfig,
}

impl ExportLoader {
    /// Creates a new loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parses one export document. Messages keep their file order.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        let document: Value =
            serde_json::from_str(content).map_err(|e| ChatlensError::export_parse(e, None))?;

        let entries = document
            .get("messages")
            .and_then(Value::as_array)
            .ok_or_else(|| ChatlensError::invalid_format(FORMAT, "missing `messages` array"))?;

        let mut messages = Vec::with_capacity(entries.len());
        let mut skipped = 0usize;
        for (index, entry) in entries.iter().enumerate() {
            match Message::deserialize(entry) {
                Ok(message) => messages.push(message),
                Err(e) if self.config.skip_invalid => {
                    debug!(index, error = %e, "skipping malformed message");
                    skipped += 1;
                }
                Err(e) => {
                    return Err(ChatlensError::Parse {
                        format: FORMAT,
                        source: ParseErrorKind::Other(format!("message {index}: {e}")),
                        path: None,
                    });
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, "skipped malformed messages");
        }
        Ok(messages)
    }

    /// Loads one export file. Messages keep their file order.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Message>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let messages = self
            .parse_str(&content)
            .map_err(|e| e.with_path(path))?;
        debug!(path = %path.display(), messages = messages.len(), "loaded export");
        Ok(messages)
    }

    /// Loads several export files, concatenates them in argument order and
    /// sorts the result by timestamp.
    pub fn load_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        for path in paths {
            messages.extend(self.load(path)?);
        }
        sort_chronologically(&mut messages);
        info!(files = paths.len(), messages = messages.len(), "loaded exports");
        Ok(messages)
    }
}

/// Parses one export document with the default configuration.
pub fn parse_export_str(content: &str) -> Result<Vec<Message>> {
    ExportLoader::new().parse_str(content)
}

/// Loads one export file with the default configuration.
pub fn load_export(path: impl AsRef<Path>) -> Result<Vec<Message>> {
    ExportLoader::new().load(path)
}

/// Loads, concatenates and sorts several export files.
pub fn load_exports<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Message>> {
    ExportLoader::new().load_all(paths)
}
