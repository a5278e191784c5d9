//! Running score and the set of words already scored.

use std::collections::HashSet;

/// Points for a word of `len` letters: one point per letter beyond the second.
pub fn word_score(len: usize) -> u32 {
    len.saturating_sub(2) as u32
}

/// Total points and the number of words that earned them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    total: u32,
    word_count: u32,
}

impl Score {
    /// Adds one scored word.
    pub fn add(&mut self, points: u32) {
        self.total += points;
        self.word_count += 1;
    }

    /// The sum of all word scores.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// The number of scored words.
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Average points per word, or 0 before the first word.
    pub fn average(&self) -> f32 {
        if self.word_count == 0 {
            0.0
        } else {
            self.total as f32 / self.word_count as f32
        }
    }

    /// Back to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Words already scored in the current scope (the session in free-play, the level in level-play).
#[derive(Clone, Debug, Default)]
pub struct FoundWords {
    words: HashSet<String>,
    order: Vec<String>,
}

impl FoundWords {
    /// Whether `word` has been found. Case-insensitive.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    /// Records `word`. Returns false if it was already found.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.to_uppercase();

        if self.words.insert(word.clone()) {
            self.order.push(word);
            true
        } else {
            false
        }
    }

    /// The found words in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The number of found words.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been found yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forgets every found word.
    pub fn clear(&mut self) {
        self.words.clear();
        self.order.clear();
    }
}
