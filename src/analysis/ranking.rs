//! Frequency counting with first-seen tie breaking.

use std::collections::HashMap;

/// Counts keys while remembering the order in which they first appeared.
///
/// Ranking sorts by count with a stable sort, so keys with equal counts stay
/// in first-seen order.
///
/// ```rust
/// use chatlens::analysis::FrequencyTable;
///
/// let mut table = FrequencyTable::new();
/// for word in ["pizza", "pasta", "pasta", "salad", "pizza"] {
///     table.add(word);
/// }
/// assert_eq!(
///     table.top(2),
///     vec![("pizza".to_string(), 2), ("pasta".to_string(), 2)]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`.
    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    /// Adds `n` occurrences of `key`. Adding zero is a no-op.
    pub fn add_n(&mut self, key: &str, n: u64) {
        if n == 0 {
            return;
        }
        if let Some(&i) = self.index.get(key) {
            self.entries[i].1 += n;
        } else {
            self.index.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), n));
        }
    }

    /// Count of `key`, zero if never seen.
    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// All entries by descending count, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `limit` highest counts.
    pub fn top(&self, limit: usize) -> Vec<(String, u64)> {
        self.ranked()
            .into_iter()
            .take(limit)
            .map(|(k, n)| (k.to_string(), n))
            .collect()
    }

    /// The highest count, earliest key on ties.
    pub fn most_common(&self) -> Option<(&str, u64)> {
        self.ranked().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut table = FrequencyTable::new();
        table.add("a");
        table.add("b");
        table.add("a");
        table.add_n("c", 5);
        assert_eq!(table.get("a"), 2);
        assert_eq!(table.get("c"), 5);
        assert_eq!(table.get("missing"), 0);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 8);
    }

    #[test]
    fn test_add_zero_creates_nothing() {
        let mut table = FrequencyTable::new();
        table.add_n("a", 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_ranked_is_stable() {
        let mut table = FrequencyTable::new();
        for key in ["x", "y", "z", "y", "w", "x"] {
            table.add(key);
        }
        let ranked: Vec<_> = table.ranked().into_iter().map(|(k, _)| k).collect();
        assert_eq!(ranked, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_top_truncates() {
        let mut table = FrequencyTable::new();
        for key in ["a", "b", "c", "c"] {
            table.add(key);
        }
        assert_eq!(table.top(2), vec![("c".to_string(), 2), ("a".to_string(), 1)]);
        assert!(table.top(0).is_empty());
        assert_eq!(table.top(10).len(), 3);
    }

    #[test]
    fn test_most_common() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.most_common(), None);
        table.add("😂");
        table.add("❤");
        assert_eq!(table.most_common(), Some(("😂", 1)));
    }

    #[test]
    fn test_iter_first_seen_order() {
        let mut table = FrequencyTable::new();
        table.add("b");
        table.add("a");
        table.add("b");
        let keys: Vec<_> = table.iter().collect();
        assert_eq!(keys, vec![("b", 2), ("a", 1)]);
    }
}
