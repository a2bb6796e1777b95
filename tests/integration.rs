//! Integration tests for the full library pipeline:
//! load exports -> aggregate -> write outputs -> cache.

use std::fs;
use std::path::Path;

use chatlens::analysis::{InsightSummary, aggregate};
use chatlens::cache::SnapshotCache;
use chatlens::config::{AnalysisConfig, LoaderConfig};
use chatlens::loader::{ExportLoader, load_exports};
use chatlens::output::{from_json, to_csv, write_csv, write_json};
use chatlens::prelude::*;
use tempfile::tempdir;

/// Two files of one split export, newest first, with the same damage as a
/// real download.
const MESSAGE_1: &str = r#"{
  "participants": [{"name": "Alice"}, {"name": "Bob"}],
  "messages": [
    {"sender_name": "Bob", "timestamp_ms": 1705401000000, "content": "Pizza tonight again ð\u009f\u008d\u0095",
     "reactions": [{"reaction": "â\u009d¤", "actor": "Alice"}]},
    {"sender_name": "Alice", "timestamp_ms": 1705314900000, "content": "TrÃ¨s bien, merci",
     "share": {"link": "https://open.spotify.com/track/123", "share_text": "song"}},
    {"sender_name": "Alice", "timestamp_ms": 1705314720000, "content": "â\u009d¤â\u009d¤"}
  ],
  "title": "Alice and Bob",
  "thread_path": "inbox/aliceandbob_123"
}"#;

const MESSAGE_2: &str = r#"{
  "participants": [{"name": "Alice"}, {"name": "Bob"}],
  "messages": [
    {"sender_name": "Bob", "timestamp_ms": 1705314660000, "content": "Hey! Pizza?",
     "photos": [{"uri": "photos/1.jpg", "creation_timestamp": 1705314660}]},
    {"sender_name": "Alice", "timestamp_ms": 1705314600000, "content": "Ð\u009fÑ\u0080Ð¸Ð²ÐµÑ\u0082"},
    {"timestamp_ms": 1705314500000, "content": "You are now connected on Messenger"}
  ]
}"#;

fn write_exports(dir: &Path) -> Vec<std::path::PathBuf> {
    let first = dir.join("message_1.json");
    let second = dir.join("message_2.json");
    fs::write(&first, MESSAGE_1).unwrap();
    fs::write(&second, MESSAGE_2).unwrap();
    vec![first, second]
}

#[test]
fn test_load_and_aggregate_split_export() {
    let dir = tempdir().unwrap();
    let paths = write_exports(dir.path());

    let messages = load_exports(&paths).unwrap();
    assert_eq!(messages.len(), 6);
    assert!(
        messages
            .windows(2)
            .all(|w| w[0].timestamp_ms <= w[1].timestamp_ms)
    );

    let snapshot = aggregate(&messages, &AnalysisConfig::default());
    assert_eq!(snapshot.total_messages, 6);
    assert_eq!(snapshot.participants, vec!["Alice", "Bob"]);
    assert_eq!(snapshot.messages_by_participant.values().sum::<u64>(), 5);

    // Repaired text feeds words and emoji.
    assert_eq!(snapshot.top_words[0].word, "pizza");
    assert_eq!(snapshot.top_words[0].count, 2);
    assert!(snapshot.top_words.iter().any(|w| w.word == "привет"));
    assert!(snapshot.top_words.iter().any(|w| w.word == "très"));
    assert_eq!(snapshot.top_emojis[0].emoji, "❤");
    assert_eq!(snapshot.top_emojis[0].count, 2);

    assert_eq!(snapshot.links_by_domain["open.spotify.com"], 1);
    assert_eq!(snapshot.media_by_type.photo, 1);
    // The next-day message after a long silence starts a conversation.
    assert_eq!(snapshot.conversation_starters["Bob"], 1);
    assert_eq!(snapshot.messages_by_day.len(), 2);
}

#[test]
fn test_file_order_does_not_matter() {
    let dir = tempdir().unwrap();
    let paths = write_exports(dir.path());
    let reversed: Vec<_> = paths.iter().rev().cloned().collect();

    let config = AnalysisConfig::default();
    assert_eq!(
        aggregate(&load_exports(&paths).unwrap(), &config),
        aggregate(&load_exports(&reversed).unwrap(), &config)
    );
}

#[test]
fn test_strict_loader_rejects_bad_entry() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"messages": [{"sender_name": "A", "timestamp_ms": "yesterday"}, "yesterday"]}"#,
    )
    .unwrap();

    // A mistyped field only blanks that field; a non-object entry is skipped.
    let lenient = ExportLoader::new().load(&path).unwrap();
    assert_eq!(lenient.len(), 1);
    assert_eq!(lenient[0].sender(), Some("A"));
    assert_eq!(lenient[0].timestamp_ms, None);

    let strict = ExportLoader::with_config(LoaderConfig::new().with_skip_invalid(false));
    let err = strict.load(&path).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn test_outputs() {
    let dir = tempdir().unwrap();
    let paths = write_exports(dir.path());
    let messages = load_exports(&paths).unwrap();
    let snapshot = aggregate(&messages, &AnalysisConfig::default());

    let json_path = dir.path().join("stats.json");
    write_json(&snapshot, &json_path).unwrap();
    let parsed = from_json(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed, snapshot);

    let csv_path = dir.path().join("messages.csv");
    write_csv(&messages, &csv_path).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 6);
    assert_eq!(&rows[0][1], "");
    assert_eq!(&rows[2][5], "1");
    assert_eq!(to_csv(&messages).unwrap(), fs::read_to_string(&csv_path).unwrap());
}

#[test]
fn test_insight_summary() {
    let dir = tempdir().unwrap();
    let messages = load_exports(&write_exports(dir.path())).unwrap();
    let snapshot = aggregate(&messages, &AnalysisConfig::default());
    let summary = InsightSummary::build(&snapshot, &messages);

    assert_eq!(summary.total_messages, 6);
    assert!(!summary.is_large_dataset);
    assert_eq!(summary.time_span_days, 1);
    let alice = summary
        .recent_messages
        .iter()
        .find(|m| m.timestamp == 1_705_314_600_000)
        .unwrap();
    assert_eq!(alice.content, "Привет");

    let json = summary.to_json().unwrap();
    assert!(json.contains("recentMessages"));
}

#[test]
fn test_cache_roundtrip() {
    let dir = tempdir().unwrap();
    let messages = load_exports(&write_exports(dir.path())).unwrap();
    let config = AnalysisConfig::default();
    let snapshot = aggregate(&messages, &config);
    let cache = SnapshotCache::new(dir.path().join("cache.json"));

    assert!(cache.get_fresh(messages.len(), &config).is_none());
    cache.store(&snapshot, messages.len(), &config).unwrap();
    assert_eq!(cache.get_fresh(messages.len(), &config), Some(snapshot));
    // A new message or a different ranking size invalidates the entry.
    assert!(cache.get_fresh(messages.len() + 1, &config).is_none());
    assert!(cache.get_fresh(messages.len(), &config.with_top_words(3)).is_none());
}

#[test]
fn test_prelude_pipeline() -> Result<()> {
    let messages = vec![
        Message::new("Alice", "prelude works 😂").with_timestamp_ms(1000),
        Message::new("Bob", "indeed").with_timestamp_ms(2000),
    ];
    let snapshot = aggregate(&messages, &AnalysisConfig::default());
    let json = to_json(&snapshot)?;
    assert!(json.contains("\"totalMessages\": 2"));
    assert_eq!(extract_emojis("prelude works 😂"), vec!["😂"]);
    Ok(())
}
