//! Turns a finished path into a scored word, or a reason it was rejected.

use std::sync::Arc;

use rand::Rng;

use crate::{
    dictionary::Dictionary,
    events::GameEvent,
    regenerator::LetterRegenerator,
    score::{word_score, FoundWords, Score},
    Grid, Position,
};

/// Minimum word length for valid words.
pub const MIN_WORD_LENGTH: usize = 3;

/// Maximum word length for valid words.
pub const MAX_WORD_LENGTH: usize = 8;

/// Why a word was not accepted. Rejections leave the grid and the score untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The word is shorter than [MIN_WORD_LENGTH] or longer than [MAX_WORD_LENGTH].
    InvalidLength {
        /// The word's length in letters.
        length: usize,
    },

    /// The word was already scored in this session or level.
    AlreadyFound,

    /// The word is not in the dictionary.
    NotAWord,
}

impl Rejection {
    /// Returns a player-facing message.
    pub fn message(&self) -> String {
        match self {
            Rejection::InvalidLength { length } if *length < MIN_WORD_LENGTH => {
                format!("Too short ({} letters, need {}+)", length, MIN_WORD_LENGTH)
            }
            Rejection::InvalidLength { length } => {
                format!("Too long ({} letters, max {})", length, MAX_WORD_LENGTH)
            }
            Rejection::AlreadyFound => "Already found".to_string(),
            Rejection::NotAWord => "Not in dictionary".to_string(),
        }
    }
}

/// A word that passed every check, with everything it changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedWord {
    /// The uppercase word.
    pub word: String,

    /// Points earned.
    pub score: u32,

    /// How many unconsumed bonus cells the word used up.
    pub bonus_used: u32,

    /// Cells that were blocked until this word was played next to them.
    pub unlocked: Vec<Position>,

    /// The path that spelled the word.
    pub path: Vec<Position>,
}

/// The result of evaluating a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The word was scored.
    Accepted(AcceptedWord),

    /// The word was rejected.
    Rejected {
        /// The word as spelled by the path, uppercased.
        word: String,
        /// Why.
        reason: Rejection,
    },
}

impl Outcome {
    /// Whether the word was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// The word the path spelled.
    pub fn word(&self) -> &str {
        match self {
            Outcome::Accepted(accepted) => &accepted.word,
            Outcome::Rejected { word, .. } => word,
        }
    }
}

/// Mutable game state an evaluation may change.
pub struct Scoreboard<'a> {
    /// The grid the path was drawn on.
    pub grid: &'a mut Grid,

    /// The running score.
    pub score: &'a mut Score,

    /// Words already scored in the active scope.
    pub found: &'a mut FoundWords,
}

/// Validates and scores words.
#[derive(Clone, Debug)]
pub struct WordEvaluator {
    dictionary: Arc<Dictionary>,
    regenerator: LetterRegenerator,
}

impl WordEvaluator {
    /// Creates an evaluator checking words against `dictionary`. `regenerator` refills used cells when
    /// regeneration is requested.
    pub fn new(dictionary: Arc<Dictionary>, regenerator: LetterRegenerator) -> Self {
        Self {
            dictionary,
            regenerator,
        }
    }

    /// The dictionary words are checked against.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Runs the checks in order and stops at the first failure:
    ///
    /// 1. length between [MIN_WORD_LENGTH] and [MAX_WORD_LENGTH],
    /// 2. not already found,
    /// 3. in the dictionary.
    pub fn check(&self, word: &str, found: &FoundWords) -> Result<(), Rejection> {
        let length = word.chars().count();

        if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&length) {
            return Err(Rejection::InvalidLength { length });
        }

        if found.contains(word) {
            return Err(Rejection::AlreadyFound);
        }

        if !self.dictionary.contains(word) {
            return Err(Rejection::NotAWord);
        }

        Ok(())
    }

    /// Evaluates the word spelled by `path`.
    ///
    /// An accepted word is scored and remembered. Each unconsumed bonus cell on the path is consumed, and
    /// every blocked cell next to the path is unblocked (one ring only). With `regenerate`, each cell of
    /// the path then receives a new letter from the [LetterRegenerator]. A rejected word changes nothing.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        path: &[Position],
        board: Scoreboard<'_>,
        regenerate: bool,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Outcome {
        let Scoreboard { grid, score, found } = board;
        let word = grid.word_at(path).to_uppercase();

        if let Err(reason) = self.check(&word, found) {
            log::debug!("Rejected {:?}: {}", word, reason.message());

            events.push(GameEvent::WordRejected {
                word: word.clone(),
                reason: reason.clone(),
            });

            return Outcome::Rejected { word, reason };
        }

        let points = word_score(word.chars().count());
        score.add(points);
        found.insert(&word);

        let mut bonus_used = 0;
        for &position in path {
            if grid.consume_bonus(position) {
                bonus_used += 1;
                events.push(GameEvent::BonusConsumed(position));
            }
        }

        let mut unlocked = Vec::new();
        for &position in path {
            let neighbors: Vec<Position> = grid.neighbors(position).collect();

            for neighbor in neighbors {
                if grid.unblock(neighbor) {
                    log::debug!("Unblocked tile at {}", neighbor);
                    unlocked.push(neighbor);
                    events.push(GameEvent::CellUnblocked(neighbor));
                }
            }
        }

        if regenerate {
            for &position in path {
                let letter = self.regenerator.replacement(grid, position, rng);
                grid.set_letter(position, letter);
                events.push(GameEvent::LetterChanged { position, letter });
            }
        }

        log::debug!(
            "Accepted {:?} for {} points, total {}",
            word,
            points,
            score.total()
        );

        let accepted = AcceptedWord {
            word,
            score: points,
            bonus_used,
            unlocked,
            path: path.to_vec(),
        };

        events.push(GameEvent::WordAccepted(accepted.clone()));
        events.push(GameEvent::ScoreChanged(*score));

        Outcome::Accepted(accepted)
    }
}
