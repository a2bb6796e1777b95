//! Message records as they appear in a "download your data" chat export.
//!
//! This module provides [`Message`], a direct serde mapping of one entry of the
//! export's `messages` array. Every field is optional because real exports
//! omit fields freely: system notices have no sender, shares have no text,
//! unsent messages have neither. A field that is `null` or has an unexpected
//! shape reads as absent instead of rejecting the whole message.
//!
//! # Examples
//!
//! ## Deserializing an export entry
//!
//! ```
//! use chatlens::Message;
//!
//! let json = r#"{"sender_name": "Alice", "timestamp_ms": 1705314600000, "content": "hi"}"#;
//! let msg: Message = serde_json::from_str(json)?;
//!
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert_eq!(msg.content(), Some("hi"));
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! ## Builder Pattern
//!
//! ```
//! use chatlens::Message;
//!
//! let msg = Message::new("Bob", "look at this")
//!     .with_timestamp_ms(1705314600000)
//!     .with_photos(2)
//!     .with_reaction("❤", "Alice");
//!
//! assert_eq!(msg.media_count(), 2);
//! assert_eq!(msg.reactions.len(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One message from a chat export.
///
/// Field names follow the export's JSON keys through serde renames, so a
/// record round-trips through `serde_json` without loss.
///
/// | Field | JSON key | Description |
/// |-------|----------|-------------|
/// | `sender` | `sender_name` | Display name of the author |
/// | `timestamp_ms` | `timestamp_ms` | Unix time in milliseconds |
/// | `content` | `content` | Text, possibly mis-encoded |
/// | `kind` | `type` | Platform message type (`Generic`, `Share`, ...) |
/// | `reactions` | `reactions` | Reactions left on this message |
/// | `photos`, `videos`, `audio_files` | same | Attached media |
/// | `share` | `share` | Shared link and its caption |
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author.
    #[serde(
        rename = "sender_name",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub sender: Option<String>,

    /// When the message was sent, in Unix milliseconds.
    #[serde(
        default,
        deserialize_with = "lenient_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp_ms: Option<i64>,

    /// Raw text content exactly as exported.
    ///
    /// Meta exports store UTF-8 bytes as Latin-1 code points, so this is
    /// frequently mojibake. See [`crate::text::repair`].
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Platform message type.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// Reactions left on this message by participants.
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reactions: Vec<Reaction>,

    /// Attached photos.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<MediaRef>>,

    /// Attached videos.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<MediaRef>>,

    /// Attached voice notes and audio files.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub audio_files: Option<Vec<MediaRef>>,

    /// Shared link, if any.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub share: Option<SharedLink>,
}

/// A reaction left on a message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reaction {
    /// Reaction label, usually a (mis-encoded) emoji.
    #[serde(default, deserialize_with = "lenient")]
    pub reaction: String,
    /// Name of the participant who reacted.
    #[serde(default, deserialize_with = "lenient")]
    pub actor: String,
}

/// A reference to an attached media file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_timestamp: Option<i64>,
}

/// A shared link with its optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharedLink {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub share_text: Option<String>,
}

/// Reads a field, treating `null` and values of the wrong shape as the
/// default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Reads a list, dropping elements that do not parse. Anything but an
/// array yields an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

/// Reads an integer that may have been written as a float. Fractions are
/// truncated; non-numbers and values outside `i64` read as absent.
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

    let Value::Number(number) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.is_finite() && (-LIMIT..LIMIT).contains(f))
            .map(|f| f as i64)
    }))
}

impl Message {
    /// Creates a message with a sender and text content.
    ///
    /// All other fields are empty.
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: Some(sender.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the timestamp in Unix milliseconds.
    #[must_use]
    pub fn with_timestamp_ms(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    /// Builder method to set the platform message type.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Builder method to add a reaction.
    #[must_use]
    pub fn with_reaction(mut self, reaction: impl Into<String>, actor: impl Into<String>) -> Self {
        self.reactions.push(Reaction {
            reaction: reaction.into(),
            actor: actor.into(),
        });
        self
    }

    /// Builder method to attach `count` photos.
    #[must_use]
    pub fn with_photos(mut self, count: usize) -> Self {
        self.photos = Some(vec![MediaRef::default(); count]);
        self
    }

    /// Builder method to attach `count` videos.
    #[must_use]
    pub fn with_videos(mut self, count: usize) -> Self {
        self.videos = Some(vec![MediaRef::default(); count]);
        self
    }

    /// Builder method to attach `count` audio files.
    #[must_use]
    pub fn with_audio(mut self, count: usize) -> Self {
        self.audio_files = Some(vec![MediaRef::default(); count]);
        self
    }

    /// Builder method to set a shared link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.share = Some(SharedLink {
            link: Some(link.into()),
            share_text: None,
        });
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name. Empty names count as absent.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the raw text content. Empty text counts as absent.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Returns the shared link URL, if any.
    pub fn link(&self) -> Option<&str> {
        self.share.as_ref().and_then(|s| s.link.as_deref())
    }

    /// Returns the timestamp as a UTC datetime.
    ///
    /// `None` when the timestamp is missing or out of chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.timestamp_ms.and_then(DateTime::from_timestamp_millis)
    }

    /// Number of attached photos.
    pub fn photo_count(&self) -> usize {
        self.photos.as_ref().map_or(0, Vec::len)
    }

    /// Number of attached videos.
    pub fn video_count(&self) -> usize {
        self.videos.as_ref().map_or(0, Vec::len)
    }

    /// Number of attached audio files.
    pub fn audio_count(&self) -> usize {
        self.audio_files.as_ref().map_or(0, Vec::len)
    }

    /// Total number of media attachments of all kinds.
    pub fn media_count(&self) -> usize {
        self.photo_count() + self.video_count() + self.audio_count()
    }

    /// Returns `true` if at least one media file is attached.
    pub fn has_media(&self) -> bool {
        self.media_count() > 0
    }
}

/// Sorts messages by timestamp, ascending.
///
/// Missing timestamps sort as epoch 0, i.e. first. The sort is stable, so
/// messages with equal timestamps keep their relative order (and therefore
/// the order of the files they were loaded from).
pub fn sort_chronologically(messages: &mut [Message]) {
    messages.sort_by_key(|m| m.timestamp_ms.unwrap_or(0));
}
