//! The engine: one owner for the grid, the selection, the score and the level state, shared by free-play
//! and level-play.

use std::{sync::Arc, time::Duration};

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::EngineConfig,
    dictionary::Dictionary,
    evaluator::{AcceptedWord, Outcome, Scoreboard, WordEvaluator},
    events::GameEvent,
    generator::{GridGenerator, WordSpan},
    level_data::LevelRecord,
    letters::LetterPool,
    progression::{LevelProgression, LevelState, Progress, Transition},
    regenerator::LetterRegenerator,
    score::{FoundWords, Score},
    selection::SelectionController,
    Grid, Position, Result,
};

/// Which game is being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// A seeded grid whose used letters are replaced after every word. Found words are remembered for the
    /// whole session.
    FreePlay,

    /// Authored levels with objectives. Letters are never replaced and found words are remembered per level.
    Levels,
}

/// The word grid rules engine.
///
/// Input events ([`begin_selection`](Engine::begin_selection), [`extend_selection`](Engine::extend_selection),
/// [`release_selection`](Engine::release_selection)) and [`tick`](Engine::tick) must be delivered from one
/// thread in the order they happened. Everything the presentation layer may want to show is queued as
/// [GameEvent]s, drained with [`take_events`](Engine::take_events).
pub struct Engine {
    config: EngineConfig,
    fill_letters: LetterPool,
    evaluator: WordEvaluator,
    levels: Vec<LevelRecord>,
    mode: Mode,
    grid: Grid,
    placements: Vec<(String, WordSpan)>,
    selection: SelectionController,
    score: Score,
    found: FoundWords,
    progression: LevelProgression,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Creates an engine in free-play mode with a freshly seeded grid. `levels` are the authored layouts,
    /// level 1 first.
    pub fn new(config: EngineConfig, dictionary: Arc<Dictionary>, levels: Vec<LevelRecord>) -> Result<Self> {
        Self::with_rng(config, dictionary, levels, StdRng::from_entropy())
    }

    /// Like [`Engine::new`], but every random choice is derived from `seed`.
    pub fn with_seed(
        config: EngineConfig,
        dictionary: Arc<Dictionary>,
        levels: Vec<LevelRecord>,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(config, dictionary, levels, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: EngineConfig,
        dictionary: Arc<Dictionary>,
        levels: Vec<LevelRecord>,
        mut rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;

        let fill_letters = LetterPool::new(&config.fill_letters)?;
        let replacement_letters = LetterPool::new(&config.replacement_letters)?;

        let regenerator = LetterRegenerator::new(dictionary.clone(), replacement_letters);
        let evaluator = WordEvaluator::new(dictionary, regenerator);

        let seeded = GridGenerator::seeded(&config.seeded(&fill_letters), &mut rng)?;
        let progression = LevelProgression::new(config.transition_delay());

        log::info!("Engine ready with {} levels", levels.len());

        Ok(Self {
            config,
            fill_letters,
            evaluator,
            levels,
            mode: Mode::FreePlay,
            grid: seeded.grid,
            placements: seeded.placements,
            selection: SelectionController::new(),
            score: Score::default(),
            found: FoundWords::default(),
            progression,
            rng,
            events: vec![GameEvent::ModeChanged(Mode::FreePlay), GameEvent::GridRebuilt],
        })
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The grid being played.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The seed words hidden in the current free-play grid. Empty in level-play.
    pub fn placements(&self) -> &[(String, WordSpan)] {
        &self.placements
    }

    /// The running score of the active scope.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Words already scored in the active scope.
    pub fn found_words(&self) -> &FoundWords {
        &self.found
    }

    /// The level being played. [`None`] in free-play.
    pub fn level_state(&self) -> Option<&LevelState> {
        self.progression.state()
    }

    /// The level transition waiting for its delay, if any.
    pub fn pending_transition(&self) -> Option<Transition> {
        self.progression.pending()
    }

    /// The number of authored levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// The dictionary words are checked against.
    pub fn dictionary(&self) -> &Dictionary {
        self.evaluator.dictionary()
    }

    /// The path of the gesture in progress.
    pub fn selection(&self) -> &[Position] {
        self.selection.path()
    }

    /// Whether a gesture is in progress.
    pub fn is_selecting(&self) -> bool {
        self.selection.is_selecting()
    }

    /// Drains the queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switches modes. Free-play gets a new seeded grid and a fresh score, level-play starts at level 1. If
    /// level 1 can't be loaded the engine stays as it was.
    pub fn switch_mode(&mut self, mode: Mode) -> Result<()> {
        match mode {
            Mode::FreePlay => {
                self.rebuild_seeded()?;
                self.progression.clear();

                if self.mode != Mode::FreePlay {
                    self.mode = Mode::FreePlay;
                    self.events.push(GameEvent::ModeChanged(Mode::FreePlay));
                }
            }
            Mode::Levels => self.load_level(1)?,
        }

        log::info!("Switched to {:?} mode", mode);

        Ok(())
    }

    /// Starts over: a new seeded grid and a fresh score in free-play, or a restart of the current level.
    pub fn reset(&mut self) -> Result<()> {
        match self.mode {
            Mode::FreePlay => self.rebuild_seeded(),
            Mode::Levels => {
                let level = self.level_state().map_or(1, LevelState::level);
                self.load_level(level)
            }
        }
    }

    /// Loads the 1-based `level`, resetting its counters and score. A pending advance or restart is
    /// cancelled. If the level data is bad, nothing changes and the error is returned.
    pub fn setup_level(&mut self, level: usize) -> Result<()> {
        if self.mode != Mode::Levels {
            return Err(crate::Error::WrongMode);
        }

        self.load_level(level)
    }

    /// Starts a gesture on `position`. Returns whether the cell was selected.
    pub fn begin_selection(&mut self, position: Position) -> bool {
        self.selection.begin(&self.grid, position, &mut self.events)
    }

    /// Drags the gesture onto `position`. Returns whether the path changed.
    pub fn extend_selection(&mut self, position: Position) -> bool {
        self.selection.extend(&self.grid, position, &mut self.events)
    }

    /// Ends the gesture and evaluates the word it spelled. Returns [`None`] if no gesture was in progress.
    pub fn release_selection(&mut self) -> Option<Outcome> {
        let regenerate = self.mode == Mode::FreePlay;

        let evaluator = &self.evaluator;
        let grid = &mut self.grid;
        let score = &mut self.score;
        let found = &mut self.found;
        let rng = &mut self.rng;

        let outcome = self.selection.release(&mut self.events, |path, events| {
            let board = Scoreboard { grid, score, found };
            evaluator.evaluate(path, board, regenerate, rng, events)
        })?;

        if let Outcome::Accepted(accepted) = &outcome {
            if self.mode == Mode::Levels {
                self.record_progress(accepted);
            }
        }

        Some(outcome)
    }

    /// Advances the level timer and any pending transition by `delta`. Returns an error only if a due
    /// transition tried to load bad level data, in which case the current grid is kept.
    pub fn tick(&mut self, delta: Duration) -> Result<()> {
        if self.mode != Mode::Levels {
            return Ok(());
        }

        for progress in self.progression.tick(delta) {
            if matches!(progress, Progress::Failed { .. }) {
                self.push_level_state();
            }

            self.apply(progress)?;
        }

        Ok(())
    }

    fn record_progress(&mut self, accepted: &AcceptedWord) {
        let mut progress = Vec::new();

        for _ in &accepted.unlocked {
            progress.extend(self.progression.record_unblock());
        }
        progress.extend(self.progression.record_word(accepted.bonus_used));

        self.push_level_state();

        for progress in progress {
            // completion only schedules, it never loads
            if let Err(err) = self.apply(progress) {
                log::error!("{}", err);
            }
        }
    }

    fn apply(&mut self, progress: Progress) -> Result<()> {
        match progress {
            Progress::Completed { level } => self.events.push(GameEvent::LevelCompleted { level }),
            Progress::Failed { level } => self.events.push(GameEvent::LevelFailed { level }),
            Progress::Due(Transition::Advance { from }) => {
                let next = from + 1;

                if next <= self.levels.len() {
                    log::info!("Loading level {}", next);
                    self.load_level(next)?;
                } else {
                    log::info!("All levels completed");
                    self.events.push(GameEvent::AllLevelsCleared);
                }
            }
            Progress::Due(Transition::Restart { level }) => self.load_level(level)?,
        }

        Ok(())
    }

    fn load_level(&mut self, level: usize) -> Result<()> {
        let grid = GridGenerator::authored(&self.levels, level).map_err(|err| {
            log::error!("Level load aborted: {}", err);
            err
        })?;

        self.selection.cancel(&mut self.events);

        if self.mode != Mode::Levels {
            self.mode = Mode::Levels;
            self.events.push(GameEvent::ModeChanged(Mode::Levels));
        }

        let blocked = grid.blocked_count();
        self.grid = grid;
        self.placements.clear();
        self.progression.setup(level, blocked);
        self.reset_score();

        self.events.push(GameEvent::GridRebuilt);
        self.events.push(GameEvent::LevelStarted { level });
        self.push_level_state();

        log::info!("Level {} setup complete", level);

        Ok(())
    }

    fn rebuild_seeded(&mut self) -> Result<()> {
        let seeded = GridGenerator::seeded(&self.config.seeded(&self.fill_letters), &mut self.rng)?;

        self.selection.cancel(&mut self.events);
        self.grid = seeded.grid;
        self.placements = seeded.placements;
        self.reset_score();

        self.events.push(GameEvent::GridRebuilt);

        Ok(())
    }

    fn reset_score(&mut self) {
        self.score.reset();
        self.found.clear();
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    fn push_level_state(&mut self) {
        if let Some(state) = self.progression.state() {
            self.events.push(GameEvent::LevelStateChanged(state.clone()));
        }
    }
}
