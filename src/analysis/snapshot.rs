//! The aggregated statistics record.
//!
//! A [`StatisticsSnapshot`] is produced once per aggregation pass and never
//! mutated afterwards. All maps are `BTreeMap`s so that serializing the same
//! snapshot twice yields identical bytes. Keys are camelCase in JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use super::scores::EngagementScores;

/// Counts keyed by participant name, glyph, label or domain.
pub type CountMap = BTreeMap<String, u64>;

/// Nested counts keyed by participant name.
pub type NestedCountMap = BTreeMap<String, CountMap>;

/// Everything the engine derives from one message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// Every input message, sender or not.
    pub total_messages: u64,
    /// Distinct senders in first-seen order.
    pub participants: Vec<String>,
    pub messages_by_participant: CountMap,
    /// Timestamp of the first input message, 0 if it has none.
    pub first_message: i64,
    /// Timestamp of the last input message, 0 if it has none.
    pub last_message: i64,

    pub total_words: u64,
    pub unique_words: u64,
    pub average_words_per_message: f64,
    pub words_by_participant: CountMap,
    pub top_words: Vec<WordCount>,

    pub top_emojis: Vec<EmojiCount>,
    pub emojis_by_participant: NestedCountMap,

    /// Messages per UTC calendar day, ascending by date.
    pub messages_by_day: Vec<DayCount>,
    /// Messages per UTC hour of day.
    pub messages_by_hour: [u64; 24],
    /// One entry per UTC month with at least one message, ascending.
    pub monthly_summary: Vec<MonthSummary>,
    /// Longest run of consecutive active days.
    pub longest_streak: u64,
    /// Mean delay between a message and a reply from someone else, within
    /// the conversation gap. 0 when there are no replies.
    pub average_reply_time_ms: f64,

    pub conversation_starters: CountMap,
    pub double_texts: CountMap,

    /// Reaction label counts.
    pub reactions: CountMap,
    /// Reaction label counts per reacting participant.
    pub reactions_by_participant: NestedCountMap,

    pub media_messages: u64,
    pub media_by_type: MediaTotals,
    pub media_by_participant: CountMap,

    pub links_shared: Vec<LinkRecord>,
    pub links_by_domain: CountMap,

    pub engagement_scores: EngagementScores,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: u64,
}

/// Messages on one day. `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: String,
    pub count: u64,
}

/// Activity within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// `YYYY-MM`
    pub month: String,
    pub messages: u64,
    /// Reactions left on messages sent this month.
    pub reactions: u64,
    pub media_shared: u64,
    pub active_days: u64,
    /// Most used emoji of the month, earliest on ties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_emoji: Option<String>,
}

/// Attachment counts by kind (sum of list lengths, not messages).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTotals {
    pub photo: u64,
    pub video: u64,
    pub audio: u64,
}

impl MediaTotals {
    pub fn total(&self) -> u64 {
        self.photo + self.video + self.audio
    }
}

/// A link shared in the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    pub sender: String,
    /// Unix milliseconds, 0 when the message had no timestamp.
    pub timestamp: i64,
}

impl StatisticsSnapshot {
    /// Returns `true` if the snapshot was built from no messages.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }

    /// Number of days with at least one message.
    pub fn active_days(&self) -> usize {
        self.messages_by_day.len()
    }

    /// Total number of reactions.
    pub fn total_reactions(&self) -> u64 {
        self.reactions.values().sum()
    }

    /// Whole days between the first and last message.
    pub fn time_span_days(&self) -> i64 {
        self.last_message.saturating_sub(self.first_message).max(0) / (24 * 60 * 60 * 1000)
    }

    /// Hour of day with the most messages, earliest on ties.
    pub fn busiest_hour(&self) -> Option<usize> {
        let max = *self.messages_by_hour.iter().max()?;
        if max == 0 {
            return None;
        }
        self.messages_by_hour.iter().position(|&n| n == max)
    }

    /// Day with the most messages, earliest on ties.
    pub fn busiest_day(&self) -> Option<&DayCount> {
        self.messages_by_day
            .iter()
            .rev()
            .max_by_key(|day| day.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::config::AnalysisConfig;

    #[test]
    fn test_empty_snapshot_helpers() {
        let snapshot = aggregate(&[], &AnalysisConfig::default());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.active_days(), 0);
        assert_eq!(snapshot.total_reactions(), 0);
        assert_eq!(snapshot.time_span_days(), 0);
        assert_eq!(snapshot.busiest_hour(), None);
        assert!(snapshot.busiest_day().is_none());
    }

    #[test]
    fn test_camel_case_keys() {
        let snapshot = aggregate(&[], &AnalysisConfig::default());
        let json = serde_json::to_string(&snapshot).unwrap();
        for key in [
            "totalMessages",
            "messagesByParticipant",
            "averageWordsPerMessage",
            "messagesByHour",
            "engagementScores",
            "replyEfficiency",
            "linksByDomain",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_busiest_day_prefers_earliest() {
        let mut snapshot = aggregate(&[], &AnalysisConfig::default());
        snapshot.messages_by_day = vec![
            DayCount { date: "2024-01-01".into(), count: 3 },
            DayCount { date: "2024-01-02".into(), count: 3 },
            DayCount { date: "2024-01-03".into(), count: 1 },
        ];
        assert_eq!(snapshot.busiest_day().unwrap().date, "2024-01-01");
    }

    #[test]
    fn test_media_totals() {
        let totals = MediaTotals { photo: 2, video: 1, audio: 4 };
        assert_eq!(totals.total(), 7);
    }
}
