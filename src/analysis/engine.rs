//! Single-pass aggregation.
//!
//! [`Aggregator`] owns every accumulator for one pass. Messages are pushed in
//! list order and [`Aggregator::finish`] turns the accumulators into a
//! [`StatisticsSnapshot`]. Nothing is shared between aggregators.
//!
//! The input must be sorted by timestamp (missing timestamps first). The
//! engine does not re-sort unless [`AnalysisConfig::sort_input`] is set; it
//! counts out-of-order pairs and logs a warning at the end of the pass.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use tracing::{debug, info, warn};

use super::links::domain_of;
use super::ranking::FrequencyTable;
use super::scores::{EngagementScores, ScoreInputs};
use super::snapshot::{
    CountMap, DayCount, EmojiCount, LinkRecord, MediaTotals, MonthSummary, NestedCountMap,
    StatisticsSnapshot, WordCount,
};
use super::words::tokenize;
use crate::config::AnalysisConfig;
use crate::message::Message;
use crate::progress::{Progress, ProgressCallback};
use crate::text::{EmojiExtractor, default_repairer};

/// Aggregates `messages` in one pass.
///
/// ```rust
/// use chatlens::analysis::aggregate;
/// use chatlens::config::AnalysisConfig;
/// use chatlens::Message;
///
/// let messages = vec![
///     Message::new("Alice", "pizza tonight?").with_timestamp_ms(1_705_314_600_000),
///     Message::new("Alice", "pizza!!").with_timestamp_ms(1_705_314_660_000),
///     Message::new("Bob", "yes 🍕").with_timestamp_ms(1_705_314_720_000),
/// ];
/// let snapshot = aggregate(&messages, &AnalysisConfig::default());
///
/// assert_eq!(snapshot.total_messages, 3);
/// assert_eq!(snapshot.double_texts["Alice"], 1);
/// assert_eq!(snapshot.top_words[0].word, "pizza");
/// assert_eq!(snapshot.top_emojis[0].emoji, "🍕");
/// ```
pub fn aggregate(messages: &[Message], config: &AnalysisConfig) -> StatisticsSnapshot {
    let mut aggregator = Aggregator::new(config.clone());
    for message in ordered(messages, config) {
        aggregator.push(message);
    }
    aggregator.finish()
}

/// Aggregates `messages` in chunks of `chunk_size`, reporting progress after
/// each chunk. The result is identical to [`aggregate`].
pub fn aggregate_chunked(
    messages: &[Message],
    config: &AnalysisConfig,
    chunk_size: usize,
    on_progress: &ProgressCallback,
) -> StatisticsSnapshot {
    let view = ordered(messages, config);
    let total = view.len();
    let mut aggregator = Aggregator::new(config.clone());
    let mut processed = 0;

    for (i, chunk) in view.chunks(chunk_size.max(1)).enumerate() {
        for message in chunk {
            aggregator.push(message);
        }
        processed += chunk.len();
        on_progress(Progress::new(processed, Some(total)).with_chunks(i + 1));
    }
    aggregator.finish()
}

fn ordered<'a>(messages: &'a [Message], config: &AnalysisConfig) -> Vec<&'a Message> {
    let mut view: Vec<&Message> = messages.iter().collect();
    if config.sort_input {
        view.sort_by_key(|m| m.timestamp_ms.unwrap_or(0));
    }
    view
}

/// The message before the current one, in list order.
#[derive(Debug, Clone)]
struct Previous {
    sender: Option<String>,
    timestamp_ms: Option<i64>,
}

#[derive(Debug, Default)]
struct MonthAccumulator {
    messages: u64,
    reactions: u64,
    media: u64,
    days: BTreeSet<NaiveDate>,
    emojis: FrequencyTable,
}

/// Accumulates statistics over a stream of messages.
///
/// ```rust
/// use chatlens::analysis::Aggregator;
/// use chatlens::config::AnalysisConfig;
/// use chatlens::Message;
///
/// let mut aggregator = Aggregator::new(AnalysisConfig::default());
/// aggregator.push(&Message::new("Alice", "hello there"));
/// aggregator.push(&Message::new("Bob", "hey"));
/// let snapshot = aggregator.finish();
///
/// assert_eq!(snapshot.participants, vec!["Alice", "Bob"]);
/// ```
#[derive(Debug)]
pub struct Aggregator {
    config: AnalysisConfig,
    extractor: EmojiExtractor,

    total_messages: u64,
    participants: Vec<String>,
    first_message: Option<i64>,
    last_message: i64,
    previous: Option<Previous>,
    inversions: u64,

    messages_by_participant: CountMap,
    conversation_starters: CountMap,
    double_texts: CountMap,
    media_by_participant: CountMap,
    words_by_participant: CountMap,
    emojis_by_participant: NestedCountMap,
    reactions_by_participant: NestedCountMap,

    total_words: u64,
    words: FrequencyTable,
    emojis: FrequencyTable,
    reactions: CountMap,

    days: BTreeMap<NaiveDate, u64>,
    hours: [u64; 24],
    months: BTreeMap<(i32, u32), MonthAccumulator>,

    reply_time_total_ms: i128,
    reply_count: u64,

    media_messages: u64,
    media_by_type: MediaTotals,

    links_shared: Vec<LinkRecord>,
    links_by_domain: CountMap,
}

impl Aggregator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            extractor: EmojiExtractor::new(),
            total_messages: 0,
            participants: Vec::new(),
            first_message: None,
            last_message: 0,
            previous: None,
            inversions: 0,
            messages_by_participant: CountMap::new(),
            conversation_starters: CountMap::new(),
            double_texts: CountMap::new(),
            media_by_participant: CountMap::new(),
            words_by_participant: CountMap::new(),
            emojis_by_participant: NestedCountMap::new(),
            reactions_by_participant: NestedCountMap::new(),
            total_words: 0,
            words: FrequencyTable::new(),
            emojis: FrequencyTable::new(),
            reactions: CountMap::new(),
            days: BTreeMap::new(),
            hours: [0; 24],
            months: BTreeMap::new(),
            reply_time_total_ms: 0,
            reply_count: 0,
            media_messages: 0,
            media_by_type: MediaTotals::default(),
            links_shared: Vec::new(),
            links_by_domain: CountMap::new(),
        }
    }

    /// Returns the configuration this aggregator was created with.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of messages pushed so far.
    pub fn messages_seen(&self) -> u64 {
        self.total_messages
    }

    /// Folds one message into the accumulators.
    pub fn push(&mut self, message: &Message) {
        self.total_messages += 1;
        let timestamp = message.timestamp_ms;
        if self.first_message.is_none() {
            self.first_message = Some(timestamp.unwrap_or(0));
        }
        self.last_message = timestamp.unwrap_or(0);

        let previous = self.previous.replace(Previous {
            sender: message.sender().map(str::to_string),
            timestamp_ms: timestamp,
        });
        if let Some(prev) = &previous {
            if timestamp.unwrap_or(0) < prev.timestamp_ms.unwrap_or(0) {
                self.inversions += 1;
            }
        }

        let Some(sender) = message.sender() else {
            return;
        };
        self.register_participant(sender);
        bump(&mut self.messages_by_participant, sender);

        let datetime = message.datetime();
        if let Some(dt) = datetime {
            self.record_time(dt);
        }

        if let Some(raw) = message.content() {
            self.record_text(sender, raw, datetime);
        }

        self.record_reactions(message, datetime);

        if message.has_media() {
            self.record_media(sender, message, datetime);
        }

        if let Some(link) = message.link() {
            self.record_link(sender, link, timestamp);
        }

        if let Some(prev) = &previous {
            self.record_turn(sender, timestamp, prev);
        }
    }

    fn register_participant(&mut self, sender: &str) {
        if self.messages_by_participant.contains_key(sender) {
            return;
        }
        self.participants.push(sender.to_string());
        for map in [
            &mut self.messages_by_participant,
            &mut self.conversation_starters,
            &mut self.double_texts,
            &mut self.media_by_participant,
            &mut self.words_by_participant,
        ] {
            map.insert(sender.to_string(), 0);
        }
        self.emojis_by_participant
            .entry(sender.to_string())
            .or_default();
        self.reactions_by_participant
            .entry(sender.to_string())
            .or_default();
    }

    fn record_time(&mut self, dt: DateTime<Utc>) {
        let day = dt.date_naive();
        *self.days.entry(day).or_default() += 1;
        self.hours[dt.hour() as usize] += 1;

        let month = self.month_mut(dt);
        month.messages += 1;
        month.days.insert(day);
    }

    fn record_text(&mut self, sender: &str, raw: &str, datetime: Option<DateTime<Utc>>) {
        let repaired = default_repairer().repair(raw);

        let emojis = self.extractor.extract_repaired(raw, &repaired);
        for emoji in &emojis {
            self.emojis.add(emoji);
            if let Some(per_sender) = self.emojis_by_participant.get_mut(sender) {
                bump(per_sender, emoji);
            }
        }
        if let Some(dt) = datetime {
            let month = self.month_mut(dt);
            for emoji in &emojis {
                month.emojis.add(emoji);
            }
        }

        let tokens = tokenize(&repaired);
        self.total_words += tokens.total as u64;
        if let Some(count) = self.words_by_participant.get_mut(sender) {
            *count += tokens.total as u64;
        }
        for word in &tokens.kept {
            self.words.add(word);
        }
    }

    fn record_reactions(&mut self, message: &Message, datetime: Option<DateTime<Utc>>) {
        if message.reactions.is_empty() {
            return;
        }
        for reaction in &message.reactions {
            bump(&mut self.reactions, &reaction.reaction);
            let per_actor = self
                .reactions_by_participant
                .entry(reaction.actor.clone())
                .or_default();
            bump(per_actor, &reaction.reaction);
        }
        if let Some(dt) = datetime {
            self.month_mut(dt).reactions += message.reactions.len() as u64;
        }
    }

    fn record_media(&mut self, sender: &str, message: &Message, datetime: Option<DateTime<Utc>>) {
        self.media_messages += 1;
        bump(&mut self.media_by_participant, sender);
        self.media_by_type.photo += message.photo_count() as u64;
        self.media_by_type.video += message.video_count() as u64;
        self.media_by_type.audio += message.audio_count() as u64;
        if let Some(dt) = datetime {
            self.month_mut(dt).media += 1;
        }
    }

    fn record_link(&mut self, sender: &str, link: &str, timestamp: Option<i64>) {
        let Some(domain) = domain_of(link) else {
            debug!(link, sender, "dropping shared link without a valid host");
            return;
        };
        bump(&mut self.links_by_domain, &domain);
        self.links_shared.push(LinkRecord {
            url: link.to_string(),
            sender: sender.to_string(),
            timestamp: timestamp.unwrap_or(0),
        });
    }

    /// Conversation starts, double texts and reply delays.
    fn record_turn(&mut self, sender: &str, timestamp: Option<i64>, prev: &Previous) {
        let gap = match (timestamp, prev.timestamp_ms) {
            (Some(now), Some(before)) => now.checked_sub(before),
            _ => None,
        };

        // A missing timestamp on either side, or a gap that does not fit in
        // i64, counts as a new conversation.
        if gap.is_none_or(|gap| gap > self.config.conversation_gap_ms) {
            bump(&mut self.conversation_starters, sender);
        }

        match prev.sender.as_deref() {
            Some(prev_sender) if prev_sender == sender => {
                bump(&mut self.double_texts, sender);
            }
            Some(_) => {
                if let Some(gap) = gap.filter(|g| (0..=self.config.conversation_gap_ms).contains(g))
                {
                    self.reply_time_total_ms += i128::from(gap);
                    self.reply_count += 1;
                }
            }
            None => {}
        }
    }

    fn month_mut(&mut self, dt: DateTime<Utc>) -> &mut MonthAccumulator {
        self.months.entry((dt.year(), dt.month())).or_default()
    }

    /// Ranks, scores and freezes the accumulated state.
    pub fn finish(self) -> StatisticsSnapshot {
        if self.inversions > 0 {
            warn!(
                inversions = self.inversions,
                "messages are not in ascending timestamp order; sort them first or enable sort_input"
            );
        }

        let top_words = self
            .words
            .top(self.config.top_words)
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();
        let top_emojis = self
            .emojis
            .top(self.config.top_emojis)
            .into_iter()
            .map(|(emoji, count)| EmojiCount { emoji, count })
            .collect();

        let total_starts = self.conversation_starters.values().sum();
        let total_double_texts = self.double_texts.values().sum();
        let first_participant_starts = self
            .participants
            .first()
            .and_then(|p| self.conversation_starters.get(p))
            .copied()
            .unwrap_or(0);
        let engagement_scores = EngagementScores::compute(&ScoreInputs {
            total_messages: self.total_messages,
            total_double_texts,
            first_participant_starts,
            total_starts,
            participant_count: self.participants.len(),
            active_days: self.days.len(),
        });

        let average_words_per_message = if self.total_messages == 0 {
            0.0
        } else {
            self.total_words as f64 / self.total_messages as f64
        };
        let average_reply_time_ms = if self.reply_count == 0 {
            0.0
        } else {
            self.reply_time_total_ms as f64 / self.reply_count as f64
        };

        let longest_streak = longest_streak(self.days.keys().copied());
        let messages_by_day = self
            .days
            .iter()
            .map(|(day, &count)| DayCount {
                date: day.format("%Y-%m-%d").to_string(),
                count,
            })
            .collect();
        let monthly_summary = self
            .months
            .into_iter()
            .map(|((year, month), acc)| MonthSummary {
                month: format!("{year:04}-{month:02}"),
                messages: acc.messages,
                reactions: acc.reactions,
                media_shared: acc.media,
                active_days: acc.days.len() as u64,
                top_emoji: acc.emojis.most_common().map(|(e, _)| e.to_string()),
            })
            .collect();

        info!(
            messages = self.total_messages,
            participants = self.participants.len(),
            words = self.total_words,
            emojis = self.emojis.total(),
            "aggregation finished"
        );

        StatisticsSnapshot {
            total_messages: self.total_messages,
            participants: self.participants,
            messages_by_participant: self.messages_by_participant,
            first_message: self.first_message.unwrap_or(0),
            last_message: self.last_message,
            total_words: self.total_words,
            unique_words: self.words.len() as u64,
            average_words_per_message,
            words_by_participant: self.words_by_participant,
            top_words,
            top_emojis,
            emojis_by_participant: self.emojis_by_participant,
            messages_by_day,
            messages_by_hour: self.hours,
            monthly_summary,
            longest_streak,
            average_reply_time_ms,
            conversation_starters: self.conversation_starters,
            double_texts: self.double_texts,
            reactions: self.reactions,
            reactions_by_participant: self.reactions_by_participant,
            media_messages: self.media_messages,
            media_by_type: self.media_by_type,
            media_by_participant: self.media_by_participant,
            links_shared: self.links_shared,
            links_by_domain: self.links_by_domain,
            engagement_scores,
        }
    }
}

fn bump(map: &mut CountMap, key: &str) {
    if let Some(count) = map.get_mut(key) {
        *count += 1;
    } else {
        map.insert(key.to_string(), 1);
    }
}

/// Length of the longest run of consecutive dates. Input must be ascending.
fn longest_streak(days: impl IntoIterator<Item = NaiveDate>) -> u64 {
    let mut longest = 0;
    let mut current = 0;
    let mut last: Option<NaiveDate> = None;
    for day in days {
        current = match last.and_then(|d| d.succ_opt()) {
            Some(next) if next == day => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        last = Some(day);
    }
    longest
}
