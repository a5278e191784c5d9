#![warn(missing_docs)]

//! # Word grids
//!
//! A rules engine for drag-to-spell word grid puzzles. Players drag across adjacent letters to spell words;
//! valid words score points and change the board.
//!
//! Two modes share one [Engine]:
//!
//! - **Free-play** hides a few seed words in a weighted random grid and replaces every used letter after a
//!   word is scored.
//! - **Level-play** loads authored layouts with blocked and bonus cells, and tracks per-level objectives,
//!   a countdown timer and the delayed advance to the next level.
//!
//! The engine has no clock and draws nothing. The embedding application feeds it pointer input and frame
//! deltas, and drains [GameEvent]s to update its presentation.
//!
//! ```
//! use std::sync::Arc;
//! use word_grid::{Dictionary, Engine, EngineConfig, Position};
//!
//! let dictionary = Arc::new(Dictionary::from_word_list("CAT\nCAR\nART").unwrap());
//! let mut engine = Engine::with_seed(EngineConfig::default(), dictionary, Vec::new(), 42).unwrap();
//!
//! engine.begin_selection(Position::new(0, 0));
//! engine.extend_selection(Position::new(0, 1));
//! let outcome = engine.release_selection();
//! assert!(outcome.is_some());
//!
//! for event in engine.take_events() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod generator;
pub mod grid;
pub mod letters;
pub mod level_data;
pub mod progression;
pub mod regenerator;
pub mod score;
pub mod selection;

pub use config::EngineConfig;
pub use dictionary::Dictionary;
pub use engine::{Engine, Mode};
pub use error::{Error, Result};
pub use evaluator::{AcceptedWord, Outcome, Rejection, WordEvaluator};
pub use events::GameEvent;
pub use generator::{GridGenerator, WordDirection, WordSpan};
pub use grid::{Cell, Grid, Position};
pub use letters::LetterPool;
pub use level_data::{LevelDataRoot, LevelRecord};
pub use progression::{LevelPhase, LevelProgression, LevelState, Transition};
pub use regenerator::LetterRegenerator;
pub use score::{FoundWords, Score};
pub use selection::SelectionController;
