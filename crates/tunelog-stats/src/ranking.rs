//! Per-key totals that remember the order keys were first seen.
//!
//! Rankings sort by a score with a stable sort, so equal scores keep the
//! order in which their keys first appeared in the history.

use std::collections::HashMap;
use std::hash::Hash;

/// Running totals for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Milliseconds played
    pub ms: u64,
    /// Plays
    pub plays: u64,
    /// Plays that were skips
    pub skips: u64,
}

impl Totals {
    /// Adds one play of `ms` milliseconds.
    pub fn record(&mut self, ms: u64, skipped: bool) {
        self.ms += ms;
        self.plays += 1;
        if skipped {
            self.skips += 1;
        }
    }
}

/// Encounter-ordered map from key to [`Totals`]
#[derive(Debug, Clone)]
pub struct Tally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, Totals)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals for `key`, inserted at the end when first seen.
    pub fn entry(&mut self, key: K) -> &mut Totals {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, Totals::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No key recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &(K, Totals)> {
        self.entries.iter()
    }

    /// Entries sorted by `score` descending; ties keep encounter order.
    pub fn ranked_by<S, F>(self, score: F) -> Vec<(K, Totals)>
    where
        S: Ord,
        F: Fn(&Totals) -> S,
    {
        let mut entries = self.entries;
        entries.sort_by(|a, b| score(&b.1).cmp(&score(&a.1)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accumulates() {
        let mut tally = Tally::new();
        tally.entry("a").record(100, false);
        tally.entry("b").record(50, true);
        tally.entry("a").record(25, true);

        assert_eq!(tally.len(), 2);
        let (key, totals) = tally.iter().next().unwrap();
        assert_eq!(*key, "a");
        assert_eq!(*totals, Totals { ms: 125, plays: 2, skips: 1 });
    }

    #[test]
    fn test_ranked_ties_keep_encounter_order() {
        let mut tally = Tally::new();
        for (key, ms) in [("x", 10), ("y", 30), ("z", 10), ("w", 30)] {
            tally.entry(key).record(ms, false);
        }

        let keys: Vec<_> = tally.ranked_by(|t| t.ms).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["y", "w", "x", "z"]);
    }
}
