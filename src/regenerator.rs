//! Picks replacement letters for consumed cells in free-play.

use std::{collections::BTreeSet, sync::Arc};

use rand::{seq::SliceRandom, Rng};

use crate::{dictionary::Dictionary, letters::LetterPool, Grid, Position};

/// Chooses a new letter for a cell whose letter was just used in a word.
///
/// Candidates are the distinct letters of the pool. A candidate is preferred if, together with the letters
/// around the cell, it starts some dictionary word:
///
/// - `cN` or `Nc` for any neighbor letter `N`, or
/// - `NcM` or `cNM` for any two different neighbor letters `N` and `M`.
///
/// One of the preferred candidates is picked uniformly. If none qualifies, or the cell has no neighbors, the
/// letter is drawn from the pool by weight instead. This only nudges the grid toward playable letters.
#[derive(Clone, Debug)]
pub struct LetterRegenerator {
    dictionary: Arc<Dictionary>,
    letters: LetterPool,
}

impl LetterRegenerator {
    /// Creates a regenerator drawing from `letters` and testing prefixes against `dictionary`.
    pub fn new(dictionary: Arc<Dictionary>, letters: LetterPool) -> Self {
        Self { dictionary, letters }
    }

    /// The pool replacement letters come from.
    pub fn letters(&self) -> &LetterPool {
        &self.letters
    }

    /// The distinct, uppercased letters currently around `position`.
    pub fn neighbor_letters(grid: &Grid, position: Position) -> BTreeSet<char> {
        grid.neighbors(position)
            .filter_map(|neighbor| grid.letter(neighbor))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// The pool letters that would start a dictionary word with at least one arrangement of `neighbors`.
    pub fn good_letters(&self, neighbors: &BTreeSet<char>) -> Vec<char> {
        self.letters
            .distinct()
            .iter()
            .copied()
            .filter(|&candidate| self.forms_prefix(candidate, neighbors))
            .collect()
    }

    /// Picks the replacement for the cell at `position`.
    pub fn replacement<R: Rng + ?Sized>(&self, grid: &Grid, position: Position, rng: &mut R) -> char {
        let neighbors = Self::neighbor_letters(grid, position);

        if neighbors.is_empty() {
            return self.letters.sample(rng);
        }

        let good = self.good_letters(&neighbors);

        match good.choose(rng) {
            Some(&letter) => {
                log::trace!("Replacing {} from {} good letters", position, good.len());
                letter
            }
            None => self.letters.sample(rng),
        }
    }

    fn forms_prefix(&self, candidate: char, neighbors: &BTreeSet<char>) -> bool {
        for &neighbor in neighbors {
            if self.is_prefix(&[candidate, neighbor]) || self.is_prefix(&[neighbor, candidate]) {
                return true;
            }

            for &other in neighbors.iter().filter(|&&other| other != neighbor) {
                if self.is_prefix(&[neighbor, candidate, other])
                    || self.is_prefix(&[candidate, neighbor, other])
                {
                    return true;
                }
            }
        }

        false
    }

    fn is_prefix(&self, letters: &[char]) -> bool {
        self.dictionary.is_prefix(&letters.iter().collect::<String>())
    }
}
