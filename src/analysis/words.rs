//! Word splitting for frequency statistics.

use crate::text::strip_emojis;

/// Words too common to say anything about a conversation.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "its", "may", "new", "now", "old",
    "see", "two", "who", "boy", "did", "man", "men", "put", "say", "she", "too", "use", "that",
    "this", "will", "with", "have", "from", "they", "know", "want", "been", "good", "much",
    "some", "time", "very", "when", "come", "here", "just", "like", "long", "make", "many",
    "over", "such", "take", "than", "them", "well", "were",
];

/// Words shorter than this many characters are not counted.
pub const MIN_WORD_CHARS: usize = 3;

/// Result of splitting one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Every whitespace-separated token, before any filtering.
    pub total: usize,
    /// Cleaned tokens that survived the length and stopword filters.
    pub kept: Vec<String>,
}

/// Splits already repaired text into words.
///
/// Emoji are blanked, the text is lowercased and split on whitespace. Each
/// token is reduced to its alphanumeric and `_` characters and kept when it
/// is at least [`MIN_WORD_CHARS`] long and not a stopword.
///
/// ```rust
/// use chatlens::analysis::words::tokenize;
///
/// let tokens = tokenize("Well, THAT pizza😋was amazing!!");
/// assert_eq!(tokens.total, 5);
/// assert_eq!(tokens.kept, vec!["pizza", "amazing"]);
/// ```
pub fn tokenize(text: &str) -> Tokens {
    let lowered = strip_emojis(text).to_lowercase();
    let mut tokens = Tokens::default();

    for raw in lowered.split_whitespace() {
        tokens.total += 1;
        let word = clean_token(raw);
        if word.chars().count() >= MIN_WORD_CHARS && !is_stopword(&word) {
            tokens.kept.push(word);
        }
    }
    tokens
}

/// Keeps only alphanumeric characters and underscores.
pub fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}
