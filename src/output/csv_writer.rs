//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Column names, in order.
pub const CSV_HEADER: [&str; 6] = [
    "timestamp",
    "sender",
    "content",
    "type",
    "reactions_count",
    "media_count",
];

/// Writes messages to a CSV file.
///
/// # Format
/// - Delimiter: `,`, every field quoted
/// - Columns: see [`CSV_HEADER`]
/// - `timestamp`: RFC 3339 UTC with milliseconds, empty when missing
/// - `content`: exactly as exported, not repaired
/// - `type`: `text` when missing
pub fn write_csv(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to
/// a file.
pub fn to_csv(messages: &[Message]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(messages, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(messages: &[Message], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(sink);

    writer.write_record(CSV_HEADER)?;
    for msg in messages {
        writer.write_record(build_record(msg))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV record for a single message.
fn build_record(msg: &Message) -> [String; 6] {
    [
        msg.datetime()
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            .unwrap_or_default(),
        msg.sender.clone().unwrap_or_default(),
        msg.content.clone().unwrap_or_default(),
        msg.kind.clone().unwrap_or_else(|| "text".to_string()),
        msg.reactions.len().to_string(),
        msg.media_count().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_csv_basic() {
        let messages = vec![
            Message::new("Alice", "Hello")
                .with_timestamp_ms(1_718_454_600_000)
                .with_reaction("❤", "Bob"),
            Message::new("Bob", "Hi").with_kind("Generic").with_photos(2),
        ];

        let csv = to_csv(&messages).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            r#""timestamp","sender","content","type","reactions_count","media_count""#
        );
        assert_eq!(
            lines[1],
            r#""2024-06-15T12:30:00.000Z","Alice","Hello","text","1","0""#
        );
        assert_eq!(lines[2], r#""","Bob","Hi","Generic","0","2""#);
    }

    #[test]
    fn test_to_csv_escapes_quotes_and_newlines() {
        let messages = vec![Message::new("Alice", "she said \"hi\"\nthen left")];
        let csv = to_csv(&messages).unwrap();
        assert!(csv.contains(r#""she said ""hi""
then left""#));
    }

    #[test]
    fn test_to_csv_missing_fields() {
        let csv = to_csv(&[Message::default()]).unwrap();
        assert!(csv.contains(r#""","","","text","0","0""#));
    }

    #[test]
    fn test_write_csv_roundtrip_with_reader() {
        let messages = vec![
            Message::new("Alice", "Hello, world").with_timestamp_ms(0),
            Message::new("Bob", "\u{e2}\u{9d}\u{a4}"),
        ];
        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&messages, temp_file.path()).unwrap();

        let mut reader = csv::Reader::from_path(temp_file.path()).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1970-01-01T00:00:00.000Z");
        assert_eq!(&rows[0][2], "Hello, world");
        // Content is written as exported.
        assert_eq!(&rows[1][2], "\u{e2}\u{9d}\u{a4}");
    }
}
