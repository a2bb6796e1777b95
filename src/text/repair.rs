//! Best-effort repair of mis-encoded text.
//!
//! [`Repairer::repair`] runs a fixed list of strategies and keeps the first
//! result that is measurably less garbled than the input. "Garbled" is
//! measured by [`Repairer::suspicion_score`]: the number of characters that
//! typically come from UTF-8 bytes shown as Latin-1 (see
//! [`count_suspicious`](super::charset::count_suspicious)), plus the number
//! of unresolved `\uXXXX` / `\xXX` escapes.
//!
//! # Example
//!
//! ```rust
//! use chatlens::text::repair;
//!
//! // "Привет" exported by Meta: every UTF-8 byte became one Latin-1 character
//! let exported = "\u{d0}\u{9f}\u{d1}\u{80}\u{d0}\u{b8}\u{d0}\u{b2}\u{d0}\u{b5}\u{d1}\u{82}";
//! assert_eq!(repair(exported), "Привет");
//!
//! // Clean text is returned untouched (and borrowed)
//! assert_eq!(repair("hello"), "hello");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::charset::{self, as_cp1252, as_latin1, byte_for, count_suspicious, utf8_sequence_len};
use super::tables::{EXTRA_SUBSTITUTIONS, SUBSTITUTION_GLYPHS};

static DEFAULT_REPAIRER: LazyLock<Repairer> = LazyLock::new(Repairer::new);

/// Repairs `text` with the default [`Repairer`].
pub fn repair(text: &str) -> Cow<'_, str> {
    DEFAULT_REPAIRER.repair(text)
}

/// Returns the process-wide default [`Repairer`].
pub fn default_repairer() -> &'static Repairer {
    &DEFAULT_REPAIRER
}

/// The repair strategies, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairStrategy {
    /// Treat every character as the byte it was decoded from and decode the
    /// whole buffer as UTF-8. All or nothing.
    ByteReinterpretation,
    /// Resolve literal `\uXXXX` and `\xXX` escapes.
    EscapeSequences,
    /// Literal find/replace from a [`SubstitutionTable`].
    SubstitutionTable,
    /// Decode each mis-encoded sequence on its own, leaving the rest alone.
    Latin1Roundtrip,
}

impl RepairStrategy {
    /// All strategies in priority order.
    pub const ALL: [RepairStrategy; 4] = [
        RepairStrategy::ByteReinterpretation,
        RepairStrategy::EscapeSequences,
        RepairStrategy::SubstitutionTable,
        RepairStrategy::Latin1Roundtrip,
    ];
}

impl fmt::Display for RepairStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepairStrategy::ByteReinterpretation => "byte reinterpretation",
            RepairStrategy::EscapeSequences => "escape sequences",
            RepairStrategy::SubstitutionTable => "substitution table",
            RepairStrategy::Latin1Roundtrip => "latin-1 roundtrip",
        };
        f.write_str(name)
    }
}

/// Outcome of [`Repairer::repair_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired<'a> {
    /// The repaired text, borrowed when nothing changed.
    pub text: Cow<'a, str>,
    /// The strategy that produced `text`, `None` if the input was kept.
    pub strategy: Option<RepairStrategy>,
}

/// Ordered list of literal `(pattern, replacement)` pairs.
///
/// Patterns are kept longest-first so that a full sequence wins over any of
/// its prefixes. Replacement is plain substring replacement.
///
/// # Example
///
/// ```rust
/// use chatlens::text::SubstitutionTable;
///
/// let mut table = SubstitutionTable::empty();
/// table.push("Ã©", "é");
/// assert_eq!(table.apply("cafÃ©"), "café");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    pairs: Vec<(String, String)>,
}

impl SubstitutionTable {
    /// Creates a table without any pairs.
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builds a table from glyphs, deriving their Latin-1 and Windows-1252
    /// mojibake forms, followed by explicit extra pairs.
    pub fn from_glyphs(glyphs: &[&str], extras: &[(&str, &str)]) -> Self {
        let mut table = Self::empty();
        for glyph in glyphs {
            let bytes = glyph.as_bytes();
            table.insert(as_latin1(bytes), (*glyph).to_string());
            table.insert(as_cp1252(bytes), (*glyph).to_string());
        }
        for (pattern, replacement) in extras {
            table.insert((*pattern).to_string(), (*replacement).to_string());
        }
        table.sort();
        table
    }

    /// Adds a pair, keeping the longest-first order.
    pub fn push(&mut self, pattern: impl Into<String>, replacement: impl Into<String>) {
        self.insert(pattern.into(), replacement.into());
        self.sort();
    }

    /// The pairs in application order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Applies every pair in order.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (pattern, replacement) in &self.pairs {
            if out.contains(pattern.as_str()) {
                out = out.replace(pattern.as_str(), replacement);
            }
        }
        out
    }

    fn insert(&mut self, pattern: String, replacement: String) {
        if pattern.is_empty() || pattern == replacement {
            return;
        }
        if self.pairs.iter().any(|(p, _)| *p == pattern) {
            return;
        }
        self.pairs.push((pattern, replacement));
    }

    fn sort(&mut self) {
        self.pairs
            .sort_by_key(|(pattern, _)| std::cmp::Reverse(pattern.chars().count()));
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::from_glyphs(SUBSTITUTION_GLYPHS, EXTRA_SUBSTITUTIONS)
    }
}

/// Runs the repair strategies against text.
#[derive(Debug, Clone)]
pub struct Repairer {
    table: SubstitutionTable,
    escapes: Regex,
}

impl Repairer {
    /// Creates a repairer with the built-in substitution table.
    pub fn new() -> Self {
        Self::with_table(SubstitutionTable::default())
    }

    /// Creates a repairer with a custom substitution table.
    pub fn with_table(table: SubstitutionTable) -> Self {
        Self {
            table,
            escapes: Regex::new(r"\\u([0-9a-fA-F]{4})|\\x([0-9a-fA-F]{2})")
                .expect("escape pattern is valid"),
        }
    }

    /// Returns the substitution table.
    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Number of suspicious characters plus unresolved escapes in `text`.
    pub fn suspicion_score(&self, text: &str) -> usize {
        let chars = count_suspicious(text);
        let escapes = if text.contains('\\') {
            self.escapes.find_iter(text).count()
        } else {
            0
        };
        chars + escapes
    }

    /// Repairs `text`, returning it unchanged when no strategy improves it.
    pub fn repair<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.repair_detailed(text).text
    }

    /// Repairs `text` and reports which strategy was used.
    pub fn repair_detailed<'a>(&self, text: &'a str) -> Repaired<'a> {
        let baseline = self.suspicion_score(text);
        if baseline == 0 {
            return Repaired {
                text: Cow::Borrowed(text),
                strategy: None,
            };
        }

        let replacements = count_replacement_chars(text);
        for strategy in RepairStrategy::ALL {
            let Some(candidate) = self.apply(strategy, text) else {
                continue;
            };
            if candidate != text
                && self.suspicion_score(&candidate) < baseline
                && count_replacement_chars(&candidate) <= replacements
            {
                trace!(%strategy, "repaired text");
                return Repaired {
                    text: Cow::Owned(candidate),
                    strategy: Some(strategy),
                };
            }
        }

        Repaired {
            text: Cow::Borrowed(text),
            strategy: None,
        }
    }

    /// Runs a single strategy. `None` means the strategy does not apply.
    pub fn apply(&self, strategy: RepairStrategy, text: &str) -> Option<String> {
        match strategy {
            RepairStrategy::ByteReinterpretation => reinterpret_as_utf8(text),
            RepairStrategy::EscapeSequences => {
                let unescaped = self.unescape(text)?;
                if count_suspicious(&unescaped) > 0 {
                    Some(reinterpret_as_utf8(&unescaped).unwrap_or(unescaped))
                } else {
                    Some(unescaped)
                }
            }
            RepairStrategy::SubstitutionTable => Some(self.table.apply(text)),
            RepairStrategy::Latin1Roundtrip => Some(roundtrip_sequences(text)),
        }
    }

    fn unescape(&self, text: &str) -> Option<String> {
        if !text.contains('\\') {
            return None;
        }
        let unescaped = self.escapes.replace_all(text, |caps: &Captures<'_>| {
            let hex = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), String::from)
        });
        match unescaped {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        }
    }
}

impl Default for Repairer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes the byte view of `text` as UTF-8, all or nothing.
pub fn reinterpret_as_utf8(text: &str) -> Option<String> {
    String::from_utf8(charset::reinterpret_bytes(text)).ok()
}

/// Decodes every well-formed mis-encoded UTF-8 sequence in place and keeps
/// every other character as it is.
pub fn roundtrip_sequences(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let bytes: Vec<Option<u8>> = chars.iter().map(|&c| byte_for(c)).collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if let Some(decoded) = decode_sequence_at(&bytes, i) {
            out.push(decoded.0);
            i += decoded.1;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Decodes the sequence starting at `start`, returning the character and the
/// number of input characters it consumed.
fn decode_sequence_at(bytes: &[Option<u8>], start: usize) -> Option<(char, usize)> {
    let lead = bytes[start]?;
    let len = utf8_sequence_len(lead);
    if len == 0 || start + len > bytes.len() {
        return None;
    }
    let seq: Option<Vec<u8>> = bytes[start..start + len].iter().copied().collect();
    let seq = seq?;
    let decoded = std::str::from_utf8(&seq).ok()?;
    decoded.chars().next().map(|c| (c, len))
}

fn count_replacement_chars(text: &str) -> usize {
    text.chars().filter(|&c| c == char::REPLACEMENT_CHARACTER).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mojibake(s: &str) -> String {
        as_latin1(s.as_bytes())
    }

    #[test]
    fn test_clean_text_is_borrowed() {
        let repaired = repair("plain ascii text");
        assert!(matches!(repaired, Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(repair(""), "");
    }

    #[test]
    fn test_real_emoji_untouched() {
        assert_eq!(repair("love you ❤️ 😂"), "love you ❤️ 😂");
    }

    #[test]
    fn test_byte_reinterpretation_cyrillic() {
        let text = mojibake("Привет, как дела?");
        let repaired = default_repairer().repair_detailed(&text);
        assert_eq!(repaired.text, "Привет, как дела?");
        assert_eq!(repaired.strategy, Some(RepairStrategy::ByteReinterpretation));
    }

    #[test]
    fn test_byte_reinterpretation_heart() {
        assert_eq!(repair("\u{e2}\u{9d}\u{a4}\u{ef}\u{b8}\u{8f}"), "❤️");
        assert_eq!(repair("\u{e2}\u{9d}\u{a4}"), "❤");
    }

    #[test]
    fn test_byte_reinterpretation_cp1252_form() {
        assert_eq!(repair("haha ðŸ˜‚"), "haha 😂");
    }

    #[test]
    fn test_tamil() {
        assert_eq!(repair(&mojibake("வணக்கம்")), "வணக்கம்");
    }

    #[test]
    fn test_escape_sequences_bytes() {
        let repaired =
            default_repairer().repair_detailed(r"fire ð\u009f\u0094¥");
        assert_eq!(repaired.text, "fire 🔥");
        assert_eq!(repaired.strategy, Some(RepairStrategy::EscapeSequences));
    }

    #[test]
    fn test_escape_sequences_hex() {
        assert_eq!(repair(r"wow\x21\x21"), "wow!!");
        assert_eq!(repair(r"smile ☺"), "smile ☺");
    }

    #[test]
    fn test_substitution_table_mixed_text() {
        // The legit "é" makes whole-buffer decoding fail.
        let text = "José dit â¤ï¸";
        let repaired = default_repairer().repair_detailed(text);
        assert_eq!(repaired.text, "José dit ❤️");
        assert_eq!(repaired.strategy, Some(RepairStrategy::SubstitutionTable));
    }

    #[test]
    fn test_substitution_table_tamil() {
        let table = SubstitutionTable::default();
        assert!(table.pairs().iter().any(|(p, r)| *p == mojibake("அ") && r == "அ"));
        assert!(table.pairs().iter().any(|(p, r)| p == "à¯ˆ" && r == "ை"));

        let text = format!("José {}", mojibake("வணக்கம்"));
        let repaired = default_repairer().repair_detailed(&text);
        assert_eq!(repaired.text, "José வணக்கம்");
        assert_eq!(repaired.strategy, Some(RepairStrategy::SubstitutionTable));
    }

    #[test]
    fn test_latin1_roundtrip_partial() {
        let repairer = Repairer::with_table(SubstitutionTable::empty());
        let text = format!("São {}", mojibake("Привет"));
        let repaired = repairer.repair_detailed(&text);
        assert_eq!(repaired.text, "São Привет");
        assert_eq!(repaired.strategy, Some(RepairStrategy::Latin1Roundtrip));
    }

    #[test]
    fn test_legit_accents_unchanged() {
        for text in ["café crème", "São Paulo", "Ärger über Öl", "naïve façade"] {
            assert_eq!(repair(text), text);
        }
    }

    #[test]
    fn test_invalid_sequences_fall_through() {
        // A lone lead byte cannot be decoded by anything.
        let text = "broken \u{f0} here";
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_no_new_replacement_chars() {
        let text = "\u{c3}\u{28} mixed";
        let repaired = repair(text);
        assert!(!repaired.contains(char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn test_suspicion_score() {
        let repairer = Repairer::new();
        assert_eq!(repairer.suspicion_score("hello"), 0);
        assert_eq!(repairer.suspicion_score("Ã©"), 1);
        assert_eq!(repairer.suspicion_score(r"é and \x41"), 1);
        assert_eq!(repairer.suspicion_score("Ã© and \\x41"), 2);
    }

    #[test]
    fn test_table_longest_first() {
        let table = SubstitutionTable::default();
        let lengths: Vec<usize> = table.pairs().iter().map(|(p, _)| p.chars().count()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_push_keeps_order() {
        let mut table = SubstitutionTable::empty();
        table.push("ab", "x");
        table.push("abc", "y");
        assert_eq!(table.apply("abcab"), "yx");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_repair_is_deterministic() {
        let text = mojibake("ok 👍 merci");
        assert_eq!(repair(&text), repair(&text));
    }
}
