//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::StatisticsSnapshot;
use crate::error::Result;

/// Writes the snapshot to a file as pretty JSON.
pub fn write_json(snapshot: &StatisticsSnapshot, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(snapshot)?;
    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Converts the snapshot to a pretty JSON string.
///
/// Same format as [`write_json`], but returns a String instead of writing to
/// a file.
pub fn to_json(snapshot: &StatisticsSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Reads a snapshot back from its JSON form.
pub fn from_json(json: &str) -> Result<StatisticsSnapshot> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use crate::analysis::aggregate;
    use crate::config::AnalysisConfig;
    use tempfile::NamedTempFile;

    fn snapshot() -> StatisticsSnapshot {
        let messages = vec![
            Message::new("Alice", "Hello world 😂")
                .with_timestamp_ms(1_718_454_600_000)
                .with_link("https://example.com/page"),
            Message::new("Bob", "Hi").with_timestamp_ms(1_718_454_660_000),
        ];
        aggregate(&messages, &AnalysisConfig::default())
    }

    #[test]
    fn test_to_json_keys() {
        let json = to_json(&snapshot()).unwrap();
        assert!(json.contains(r#""totalMessages": 2"#));
        assert!(json.contains(r#""emoji": "😂""#));
        assert!(json.contains(r#""example.com": 1"#));
    }

    #[test]
    fn test_json_is_lossless() {
        let original = snapshot();
        let parsed = from_json(&to_json(&original).unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_write_json() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&snapshot(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains(r#""participants": ["#));
        assert_eq!(from_json(&content).unwrap(), snapshot());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::ChatlensError::Json(_)));
    }
}
