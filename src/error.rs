//! Errors for malformed external data and invalid configuration.
//!
//! Ordinary gameplay rejections (a word that is too short, already found or not in the dictionary) are
//! not errors. They are reported as [`Rejection`](crate::Rejection) values.

/// An error that happened while building the engine, a grid or a level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The word list contained no usable words after normalization.
    #[error("dictionary is empty after normalizing the word list")]
    EmptyDictionary,

    /// A letter pool contained no letters.
    #[error("letter pool is empty")]
    EmptyLetterPool,

    /// The grid would have no cells.
    #[error("grid dimensions {0} rows x {1} columns are invalid")]
    InvalidDimensions(usize, usize),

    /// The requested level number has no level record.
    #[error("level {level} doesn't exist, {available} levels are loaded")]
    LevelOutOfRange {
        /// The 1-based level number that was requested.
        level: usize,
        /// The number of level records available.
        available: usize,
    },

    /// A level record could not be turned into a grid.
    #[error("invalid level data for level {level}: {reason}")]
    InvalidLevelData {
        /// The 1-based level number of the record.
        level: usize,
        /// What is wrong with the record.
        reason: String,
    },

    /// The seed word range asks for more words at minimum than at maximum.
    #[error("seed word range {0}..={1} is empty")]
    InvalidSeedWordRange(usize, usize),

    /// A level operation was requested while the engine is in free-play mode.
    #[error("operation requires level mode")]
    WrongMode,
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
