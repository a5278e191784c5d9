//! Observation-only notifications for the presentation layer.

use crate::{
    evaluator::{AcceptedWord, Rejection},
    progression::LevelState,
    score::Score,
    Mode, Position,
};

/// Something the presentation layer may want to show. The engine queues these as it changes state and
/// never waits on whoever drains them.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A cell joined (`selected: true`) or left (`selected: false`) the current path.
    CellHighlighted {
        /// The cell.
        position: Position,
        /// Whether it is now part of the path.
        selected: bool,
    },

    /// A blocked cell was unblocked by a neighboring word.
    CellUnblocked(Position),

    /// A bonus cell's bonus was counted.
    BonusConsumed(Position),

    /// A consumed cell received a new letter.
    LetterChanged {
        /// The cell.
        position: Position,
        /// Its new letter.
        letter: char,
    },

    /// A word was accepted and scored.
    WordAccepted(AcceptedWord),

    /// A word was rejected.
    WordRejected {
        /// The word as spelled by the path.
        word: String,
        /// Why it was rejected.
        reason: Rejection,
    },

    /// The running score changed.
    ScoreChanged(Score),

    /// The engine switched between free-play and level-play.
    ModeChanged(Mode),

    /// The whole grid was replaced.
    GridRebuilt,

    /// A level was loaded or reloaded.
    LevelStarted {
        /// The 1-based level number.
        level: usize,
    },

    /// The level's counters changed.
    LevelStateChanged(LevelState),

    /// Every objective of the level was met. Fires once per level load.
    LevelCompleted {
        /// The 1-based level number.
        level: usize,
    },

    /// The level's timer ran out.
    LevelFailed {
        /// The 1-based level number.
        level: usize,
    },

    /// The last level was completed and there is no further level data.
    AllLevelsCleared,
}
