//! Compact projection of a snapshot for an external text-generation service.
//!
//! The service itself is not part of this crate. [`InsightSummary`] only
//! prepares the data: a few headline statistics plus a sample of the most
//! recent messages, cheap to serialize repeatedly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::snapshot::{EmojiCount, StatisticsSnapshot, WordCount};
use crate::error::Result;
use crate::message::Message;
use crate::text::repair;

/// Chats with more messages than this are considered large.
pub const LARGE_DATASET_THRESHOLD: usize = 5000;
/// Recent messages included for regular chats.
pub const SAMPLE_SIZE: usize = 200;
/// Recent messages included for large chats.
pub const LARGE_SAMPLE_SIZE: usize = 300;
/// Sampled content is cut to this many characters.
pub const MAX_CONTENT_CHARS: usize = 150;

const TOP_WORDS: usize = 15;
const TOP_EMOJIS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub total_messages: usize,
    pub is_large_dataset: bool,
    pub participants: Vec<String>,
    /// Whole days between first and last message.
    pub time_span_days: i64,
    pub messages_by_participant: BTreeMap<String, u64>,
    pub top_words: Vec<WordCount>,
    pub top_emojis: Vec<EmojiCount>,
    pub recent_messages: Vec<SampleMessage>,
}

/// One message of the recent sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleMessage {
    /// Sender name, `Unknown` when absent.
    pub sender: String,
    /// Repaired content, truncated.
    pub content: String,
    pub timestamp: i64,
    pub has_media: bool,
    pub reactions: usize,
}

impl InsightSummary {
    /// Builds the summary from a snapshot and the messages it was built from.
    pub fn build(snapshot: &StatisticsSnapshot, messages: &[Message]) -> Self {
        let is_large_dataset = messages.len() > LARGE_DATASET_THRESHOLD;
        let sample_size = if is_large_dataset {
            LARGE_SAMPLE_SIZE
        } else {
            SAMPLE_SIZE
        };
        let start = messages.len().saturating_sub(sample_size);

        Self {
            total_messages: messages.len(),
            is_large_dataset,
            participants: snapshot.participants.clone(),
            time_span_days: snapshot.time_span_days(),
            messages_by_participant: snapshot.messages_by_participant.clone(),
            top_words: snapshot.top_words.iter().take(TOP_WORDS).cloned().collect(),
            top_emojis: snapshot.top_emojis.iter().take(TOP_EMOJIS).cloned().collect(),
            recent_messages: messages[start..].iter().map(SampleMessage::from).collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Message> for SampleMessage {
    fn from(msg: &Message) -> Self {
        let content = msg
            .content()
            .map(|raw| truncate_chars(&repair(raw), MAX_CONTENT_CHARS))
            .unwrap_or_default();
        Self {
            sender: msg.sender().unwrap_or("Unknown").to_string(),
            content,
            timestamp: msg.timestamp_ms.unwrap_or(0),
            has_media: msg.has_media(),
            reactions: msg.reactions.len(),
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
