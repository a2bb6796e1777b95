//! Emoji detection.
//!
//! Detection is a chain of [`EmojiDetector`]s. Two of them look at the
//! repaired text, one looks at the raw bytes of the unrepaired text to
//! recover emoji from content that repair could only partially fix.
//! [`EmojiExtractor`] merges their hits so that each occurrence is counted
//! once.
//!
//! # Example
//!
//! ```rust
//! use chatlens::text::extract_emojis;
//!
//! let emojis = extract_emojis("great \u{f0}\u{9f}\u{94}\u{a5}\u{f0}\u{9f}\u{94}\u{a5} 👍🏽");
//! assert_eq!(emojis, vec!["🔥", "🔥", "👍🏽"]);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use super::charset::reinterpret_bytes;
use super::repair::{Repairer, default_repairer};
use super::tables::{
    EMOJI_DENYLIST, KEYCAP, KEYCAP_BASES, RAW_SCAN_GLYPHS, VS16, ZWJ, is_emoji_char,
    is_regional_indicator, is_skin_tone, is_word_strip_char,
};

static DEFAULT_EXTRACTOR: LazyLock<EmojiExtractor> = LazyLock::new(EmojiExtractor::new);

/// Repairs `text` and returns every emoji occurrence in order of appearance.
pub fn extract_emojis(text: &str) -> Vec<String> {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Replaces every character of the word-stripping emoji ranges with a space.
pub fn strip_emojis(text: &str) -> String {
    text.chars()
        .map(|c| if is_word_strip_char(c) { ' ' } else { c })
        .collect()
}

/// One detected emoji.
///
/// `start` and `end` are byte offsets into whatever the detector scanned:
/// the text itself, or its byte view for [`RawPatternDetector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiHit {
    pub start: usize,
    pub end: usize,
    pub glyph: String,
}

impl EmojiHit {
    fn new(start: usize, end: usize, glyph: impl Into<String>) -> Self {
        Self {
            start,
            end,
            glyph: glyph.into(),
        }
    }

    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Finds emoji in a piece of text.
pub trait EmojiDetector {
    /// Returns hits ordered by start offset. Must not panic on any input.
    fn detect(&self, text: &str) -> Vec<EmojiHit>;
}

/// Matches characters in the emoji code point ranges.
///
/// A base glyph absorbs a trailing VS16 and skin tone modifier and follows
/// ZWJ continuations. Two adjacent regional indicators form a flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeDetector;

impl EmojiDetector for RangeDetector {
    fn detect(&self, text: &str) -> Vec<EmojiHit> {
        let mut hits = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if is_regional_indicator(c) {
                if let Some(&(_, next)) = chars.peek() {
                    if is_regional_indicator(next) {
                        chars.next();
                        let end = start + c.len_utf8() + next.len_utf8();
                        hits.push(EmojiHit::new(start, end, &text[start..end]));
                        continue;
                    }
                }
            }
            if !is_emoji_char(c) {
                continue;
            }

            let mut end = start + c.len_utf8();
            loop {
                while let Some(&(i, m)) = chars.peek() {
                    if m == VS16 || is_skin_tone(m) {
                        end = i + m.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                // Only consume a ZWJ when an emoji follows it.
                let joined = match chars.peek() {
                    Some(&(zwj_at, ZWJ)) => text[zwj_at + ZWJ.len_utf8()..]
                        .chars()
                        .next()
                        .filter(|&n| is_emoji_char(n)),
                    _ => None,
                };
                let Some(next) = joined else { break };
                chars.next();
                if let Some((i, _)) = chars.next() {
                    end = i + next.len_utf8();
                }
            }
            hits.push(EmojiHit::new(start, end, &text[start..end]));
        }
        hits
    }
}

/// Literal lookup of known multi-character glyphs.
#[derive(Debug, Clone)]
pub struct TableDetector {
    glyphs: Vec<String>,
}

impl TableDetector {
    /// Creates a detector for the given glyphs. Longer glyphs win.
    pub fn new(glyphs: impl IntoIterator<Item = String>) -> Self {
        let mut glyphs: Vec<String> = glyphs.into_iter().filter(|g| !g.is_empty()).collect();
        glyphs.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        glyphs.dedup();
        Self { glyphs }
    }

    /// Keycap sequences, with and without VS16.
    pub fn keycaps() -> Self {
        Self::new(KEYCAP_BASES.iter().flat_map(|&base| {
            [
                [base, VS16, KEYCAP].iter().collect::<String>(),
                [base, KEYCAP].iter().collect::<String>(),
            ]
        }))
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::keycaps()
    }
}

impl EmojiDetector for TableDetector {
    fn detect(&self, text: &str) -> Vec<EmojiHit> {
        let mut hits = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            if let Some(glyph) = self.glyphs.iter().find(|g| rest.starts_with(g.as_str())) {
                hits.push(EmojiHit::new(pos, pos + glyph.len(), glyph.as_str()));
                pos += glyph.len();
            } else {
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
        hits
    }
}

/// Scans the byte view of unrepaired text for known UTF-8 emoji patterns.
///
/// Each mis-decoded character is mapped back to its byte (Latin-1 or
/// Windows-1252), so the pattern for `😂` matches `ðŸ˜‚` as well as the
/// C1-control rendering. Offsets refer to the byte view.
#[derive(Debug, Clone)]
pub struct RawPatternDetector {
    glyphs: Vec<String>,
}

impl RawPatternDetector {
    pub fn new(glyphs: impl IntoIterator<Item = String>) -> Self {
        let mut glyphs: Vec<String> = glyphs.into_iter().filter(|g| !g.is_empty()).collect();
        glyphs.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        glyphs.dedup();
        Self { glyphs }
    }
}

impl Default for RawPatternDetector {
    fn default() -> Self {
        Self::new(RAW_SCAN_GLYPHS.iter().map(|g| (*g).to_string()))
    }
}

impl EmojiDetector for RawPatternDetector {
    fn detect(&self, text: &str) -> Vec<EmojiHit> {
        let bytes = reinterpret_bytes(text);
        let mut hits = Vec::new();
        let mut pos = 0;
        while pos < bytes.len() {
            let rest = &bytes[pos..];
            if let Some(glyph) = self
                .glyphs
                .iter()
                .find(|g| rest.starts_with(g.as_bytes()))
            {
                hits.push(EmojiHit::new(pos, pos + glyph.len(), glyph.as_str()));
                pos += glyph.len();
            } else {
                pos += 1;
            }
        }
        hits
    }
}

/// Runs the detector chain and merges the results.
#[derive(Debug, Clone, Default)]
pub struct EmojiExtractor {
    range: RangeDetector,
    table: TableDetector,
    raw: RawPatternDetector,
}

impl EmojiExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom table and raw detectors.
    pub fn with_detectors(table: TableDetector, raw: RawPatternDetector) -> Self {
        Self {
            range: RangeDetector,
            table,
            raw,
        }
    }

    /// Repairs `text` with the default repairer and extracts its emoji.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extract_with(default_repairer(), text)
    }

    /// Repairs `text` with `repairer` and extracts its emoji.
    pub fn extract_with(&self, repairer: &Repairer, text: &str) -> Vec<String> {
        let repaired = repairer.repair(text);
        self.extract_repaired(text, &repaired)
    }

    /// Extracts emoji when the caller already holds the repaired text.
    ///
    /// Hits from the repaired text come first, by position. The raw scan of
    /// `original` only adds occurrences of a glyph beyond the number of times
    /// that glyph already appears in `repaired`.
    pub fn extract_repaired(&self, original: &str, repaired: &str) -> Vec<String> {
        let mut hits = self.range.detect(repaired);
        hits.extend(self.table.detect(repaired));
        let hits = dedup_by_position(hits);

        let raw_hits = self.raw.detect(original);
        let mut raw_seen: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut recovered = Vec::new();
        for hit in &raw_hits {
            let glyph = hit.glyph.as_str();
            let (seen, present) = raw_seen
                .entry(glyph)
                .or_insert_with(|| (0, repaired.matches(glyph).count()));
            *seen += 1;
            if *seen > *present {
                recovered.push(hit.glyph.clone());
            }
        }

        hits.into_iter()
            .map(|hit| hit.glyph)
            .chain(recovered)
            .filter(|glyph| !is_denied(glyph))
            .collect()
    }
}

/// Sorts hits by position and drops any hit overlapping an earlier kept one.
/// At equal starts the longest hit is kept.
fn dedup_by_position(mut hits: Vec<EmojiHit>) -> Vec<EmojiHit> {
    hits.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));
    let mut kept: Vec<EmojiHit> = Vec::with_capacity(hits.len());
    for hit in hits {
        match kept.last() {
            Some(last) if hit.start < last.end => {}
            _ => kept.push(hit),
        }
    }
    kept
}

fn is_denied(glyph: &str) -> bool {
    let base = glyph.trim_end_matches(VS16);
    EMOJI_DENYLIST.contains(&base)
}
