//! Engine configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    generator::SeededConfig,
    letters::{LetterPool, FILL_LETTERS},
    Error, Result,
};

/// The configuration for the engine. Every field has a default, so a partial configuration (for example
/// deserialized from a settings file by the embedding application) only needs the fields it changes.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// The number of rows of a free-play grid.
    pub num_rows: usize,

    /// The number of columns of a free-play grid.
    pub num_columns: usize,

    /// Candidate words hidden in a free-play grid when it is built.
    pub seed_words: Vec<String>,

    /// The weighted pool that fills free-play cells not covered by a seed word.
    pub fill_letters: String,

    /// The weighted pool replacement letters are drawn from after a word is played in free-play.
    pub replacement_letters: String,

    /// The fewest seed words to try to place.
    pub min_seed_words: usize,

    /// The most seed words to try to place.
    pub max_seed_words: usize,

    /// Random placements tried per seed word before skipping it.
    pub placement_attempts: usize,

    /// Pause, in milliseconds, between a level ending and the next level (or the restart) loading.
    pub transition_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_rows: 4,
            num_columns: 4,
            seed_words: ["CAR", "ART", "EAR", "STAR", "CARE", "REAL", "AREA", "TEAR", "CLEAR"]
                .iter()
                .map(|word| word.to_string())
                .collect(),
            fill_letters: FILL_LETTERS.to_string(),
            replacement_letters: FILL_LETTERS.to_string(),
            min_seed_words: 3,
            max_seed_words: 4,
            placement_attempts: 100,
            transition_delay_ms: 2000,
        }
    }
}

impl EngineConfig {
    /// Checks the settings that would make grid generation impossible.
    pub fn validate(&self) -> Result<()> {
        if self.num_rows == 0 || self.num_columns == 0 {
            return Err(Error::InvalidDimensions(self.num_rows, self.num_columns));
        }

        if self.min_seed_words > self.max_seed_words {
            return Err(Error::InvalidSeedWordRange(
                self.min_seed_words,
                self.max_seed_words,
            ));
        }

        LetterPool::new(&self.fill_letters)?;
        LetterPool::new(&self.replacement_letters)?;

        Ok(())
    }

    /// The pause between a level ending and the next transition.
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    /// The seeded-grid settings described by this configuration, filling from `letters`.
    pub fn seeded<'a>(&'a self, letters: &'a LetterPool) -> SeededConfig<'a> {
        SeededConfig {
            num_rows: self.num_rows,
            num_columns: self.num_columns,
            seed_words: &self.seed_words,
            letters,
            words_to_place: self.min_seed_words..=self.max_seed_words,
            max_attempts: self.placement_attempts,
        }
    }
}
