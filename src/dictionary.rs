//! Word and prefix membership.

use std::{collections::BTreeSet, ops::Bound};

use crate::{Error, Result};

/// An immutable set of uppercase words that also answers prefix queries.
///
/// Words are kept in sorted order, so a prefix test is a single range lookup: the first word that is not
/// less than the prefix is the only candidate that can start with it.
#[derive(Clone, Debug)]
pub struct Dictionary {
    words: BTreeSet<String>,
}

impl Dictionary {
    /// Builds a dictionary from newline separated tokens. Each token is trimmed and uppercased, and empty
    /// tokens are dropped. Returns [`Error::EmptyDictionary`] if no words remain.
    pub fn from_word_list(list: &str) -> Result<Self> {
        Self::from_words(list.lines())
    }

    /// Builds a dictionary from any sequence of words, normalizing them the same way as
    /// [`Dictionary::from_word_list`].
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();

        if words.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        log::info!("Loaded {} words into dictionary", words.len());

        Ok(Self { words })
    }

    /// Whether `word` is in the dictionary. Case-insensitive.
    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim();

        if word.is_empty() {
            return false;
        }

        self.words.contains(&word.to_uppercase())
    }

    /// Whether any word in the dictionary starts with `prefix`. Case-insensitive. An empty prefix is never
    /// considered valid.
    pub fn is_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.trim().to_uppercase();

        if prefix.is_empty() {
            return false;
        }

        self.words
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .next()
            .map_or(false, |word| word.starts_with(&prefix))
    }

    /// The number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false, an empty dictionary can't be constructed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the words in alphabetical order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
