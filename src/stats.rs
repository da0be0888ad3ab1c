use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Occurrence counts per character.
///
/// Alongside the counts it keeps the order in which each character was
/// first seen, which is what breaks ties in [`CharacterCounts::most_common`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterCounts {
    counts: HashMap<char, u64>,
    first_seen: Vec<char>,
}

impl CharacterCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chars(chars: &[char]) -> Self {
        let mut counts = Self::new();
        for &c in chars {
            counts.add(c, 1);
        }
        counts
    }

    pub fn add(&mut self, c: char, n: u64) {
        match self.counts.entry(c) {
            Entry::Occupied(mut entry) => *entry.get_mut() += n,
            Entry::Vacant(entry) => {
                self.first_seen.push(c);
                entry.insert(n);
            }
        }
    }

    pub fn get(&self, c: char) -> Option<u64> {
        self.counts.get(&c).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.first_seen.iter().map(|&c| (c, self.counts[&c]))
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    pub fn as_map(&self) -> &HashMap<char, u64> {
        &self.counts
    }

    pub fn retain_min_frequency(&mut self, min_frequency: u64) {
        self.counts.retain(|_, count| *count >= min_frequency);
        let counts = &self.counts;
        self.first_seen.retain(|c| counts.contains_key(c));
    }

    /// The `n` most frequent characters, highest count first.
    ///
    /// Equal counts keep first-occurrence order. `n == 0` returns every entry.
    pub fn most_common(&self, n: usize) -> Vec<(char, u64)> {
        let mut entries: Vec<(char, u64)> = self.iter().collect();
        // sort_by is stable, so first-seen order survives among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        if n > 0 {
            entries.truncate(n);
        }
        entries
    }
}

impl FromIterator<(char, u64)> for CharacterCounts {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (c, n) in iter {
            counts.add(c, n);
        }
        counts
    }
}

/// Counts `chars`, then drops anything seen fewer than `min_frequency` times.
pub fn calculate_frequency(chars: &[char], min_frequency: u64) -> CharacterCounts {
    let start_time = Instant::now();

    let mut counts = CharacterCounts::from_chars(chars);
    if min_frequency > 1 {
        let before = counts.len();
        counts.retain_min_frequency(min_frequency);
        info!(
            action = "filter",
            component = "frequency_calculation",
            min_frequency,
            removed = before - counts.len(),
            "Dropped low-frequency characters"
        );
    }

    info!(
        action = "complete",
        component = "frequency_calculation",
        unique_characters = counts.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Frequency calculation completed"
    );
    counts
}
