//! Weighted letter pools used to fill and refill the grid.

use rand::{seq::SliceRandom, Rng};

use crate::{Error, Result};

/// The pool used to fill free cells of a seeded grid and to replace consumed letters. It leans heavily on the
/// letters that appear in the default seed words.
pub const FILL_LETTERS: &str = "EEEEEEEEEEEEAAAAAAARRRRRRIIIIIIIOOOOOOTTTTTTNNNNNNSSSSSSLLLLCCCCDUUUM";

/// A broader pool following the usual English tile distribution. Useful as a replacement pool when the grid
/// should drift away from the seed words' letters.
pub const ENGLISH_LETTERS: &str =
    "EEEEEEEEEEEEAAAAAAAAAIIIIIIIIIOOOOOOOONNNNNNRRRRRRTTTTTTLLLLSSSSUUUUDDDDGGGBBCCMMPPFFHHVVWWYYKJXQZ";

/// A multiset of letters. Sampling picks each occurrence with equal probability, so a letter that appears
/// `k` times out of `n` is drawn with probability `k / n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterPool {
    letters: Vec<char>,
    distinct: Vec<char>,
}

impl LetterPool {
    /// Creates a pool from the letters of `letters`. Letters are uppercased and whitespace is ignored.
    pub fn new(letters: &str) -> Result<Self> {
        let letters: Vec<char> = letters
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        if letters.is_empty() {
            return Err(Error::EmptyLetterPool);
        }

        let mut distinct = letters.clone();
        distinct.sort_unstable();
        distinct.dedup();

        Ok(Self { letters, distinct })
    }

    /// Draws one letter, weighted by how often it occurs in the pool.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        // `new` refuses empty pools
        *self.letters.choose(rng).unwrap_or(&'E')
    }

    /// The distinct letters of the pool in alphabetical order.
    pub fn distinct(&self) -> &[char] {
        &self.distinct
    }

    /// Whether `letter` occurs in the pool at all.
    pub fn contains(&self, letter: char) -> bool {
        self.distinct.binary_search(&letter).is_ok()
    }

    /// The total number of occurrences in the pool.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false, pools are never empty.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl Default for LetterPool {
    fn default() -> Self {
        Self::new(FILL_LETTERS).expect("FILL_LETTERS is not empty")
    }
}
