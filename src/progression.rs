//! Level objectives, the level timer and the delayed advance/restart between levels.

use std::time::Duration;

/// The default pause between finishing (or failing) a level and loading the next one.
pub const TRANSITION_DELAY: Duration = Duration::from_secs(2);

/// The level whose objectives also require clearing every blocked cell.
pub const CLEAR_BLOCKED_LEVEL: usize = 5;

/// The objectives of one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelRules {
    /// Accepted words needed.
    pub required_words: u32,

    /// Bonus cells that must be used. 0 means no bonus objective.
    pub required_bonus: u32,

    /// Time allowed. Zero means untimed.
    pub time_limit: Duration,
}

impl LevelRules {
    /// The rules for the 1-based `level`.
    ///
    /// | level | words      | bonus | time (s)             |
    /// |-------|------------|-------|----------------------|
    /// | 1     | 5          | 0     | untimed              |
    /// | 2     | 7          | 0     | 45                   |
    /// | 3     | 10         | 0     | 120                  |
    /// | 4, 5  | 1          | 4     | untimed              |
    /// | n > 5 | 5 + 2(n-1) | 0     | max(30, 60 - 5(n-1)) |
    pub fn for_level(level: usize) -> Self {
        let (required_words, required_bonus, seconds) = match level {
            1 => (5, 0, 0),
            2 => (7, 0, 45),
            3 => (10, 0, 120),
            4 | 5 => (1, 4, 0),
            n => {
                let n = n.saturating_sub(1) as u64;
                (5 + 2 * n as u32, 0, 60u64.saturating_sub(5 * n).max(30))
            }
        };

        Self {
            required_words,
            required_bonus,
            time_limit: Duration::from_secs(seconds),
        }
    }

    /// Whether the level has a time limit.
    pub fn is_timed(&self) -> bool {
        !self.time_limit.is_zero()
    }
}

/// Where a level stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelPhase {
    /// Objectives not met yet.
    Playing,

    /// Objectives met, waiting to advance.
    Completed,

    /// Time ran out, waiting to restart.
    Failed,
}

/// Counters of the level being played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelState {
    level: usize,
    rules: LevelRules,
    words_made: u32,
    bonus_used: u32,
    remaining_time: Duration,
    timer_active: bool,
    initial_blocked: usize,
    remaining_blocked: usize,
    phase: LevelPhase,
}

impl LevelState {
    /// Fresh counters for `level`, whose grid starts with `blocked` blocked cells.
    pub fn new(level: usize, blocked: usize) -> Self {
        let rules = LevelRules::for_level(level);

        Self {
            level,
            rules,
            words_made: 0,
            bonus_used: 0,
            remaining_time: rules.time_limit,
            timer_active: rules.is_timed(),
            initial_blocked: blocked,
            remaining_blocked: blocked,
            phase: LevelPhase::Playing,
        }
    }

    /// The 1-based level number.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The level's objectives.
    pub fn rules(&self) -> &LevelRules {
        &self.rules
    }

    /// Words accepted so far.
    pub fn words_made(&self) -> u32 {
        self.words_made
    }

    /// Bonus cells used so far.
    pub fn bonus_used(&self) -> u32 {
        self.bonus_used
    }

    /// Time left on the clock. Zero once the clock ran out, and for untimed levels.
    pub fn remaining_time(&self) -> Duration {
        self.remaining_time
    }

    /// Whether the clock is running.
    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    /// Blocked cells the grid started with.
    pub fn initial_blocked(&self) -> usize {
        self.initial_blocked
    }

    /// Blocked cells not yet unblocked.
    pub fn remaining_blocked(&self) -> usize {
        self.remaining_blocked
    }

    /// Where the level stands.
    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// Whether every objective is currently met.
    pub fn objectives_met(&self) -> bool {
        let words = self.words_made >= self.rules.required_words;
        let bonus = self.rules.required_bonus == 0 || self.bonus_used >= self.rules.required_bonus;
        let time = !self.timer_active || !self.remaining_time.is_zero();
        let blocked = self.level != CLEAR_BLOCKED_LEVEL || self.remaining_blocked == 0;

        words && bonus && time && blocked
    }

    /// A short player-facing description of the objective and progress.
    pub fn objective_text(&self) -> String {
        let rules = &self.rules;

        match self.level {
            1 => format!(
                "Make {} words\n({}/{})",
                rules.required_words, self.words_made, rules.required_words
            ),
            2 | 3 => format!(
                "Make {} words in {}s\n({}/{})",
                rules.required_words,
                rules.time_limit.as_secs(),
                self.words_made,
                rules.required_words
            ),
            4 => format!(
                "Use {} bonus letters\n(Bonus used: {}/{})",
                rules.required_bonus, self.bonus_used, rules.required_bonus
            ),
            CLEAR_BLOCKED_LEVEL => format!(
                "Unlock all blocked tiles & use {} bonus\nBonus: {}/{} | Blocked: {} remaining",
                rules.required_bonus, self.bonus_used, rules.required_bonus, self.remaining_blocked
            ),
            _ => format!(
                "Words: {}/{}, Time: {}s",
                self.words_made,
                rules.required_words,
                self.remaining_time.as_secs()
            ),
        }
    }
}

/// What to do once a completed or failed level's delay runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Load the level after `from`, or finish if there is none.
    Advance {
        /// The level that was completed.
        from: usize,
    },

    /// Load `level` again.
    Restart {
        /// The level that was failed.
        level: usize,
    },
}

/// Something that happened to the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Every objective was met.
    Completed {
        /// The level.
        level: usize,
    },

    /// The timer ran out.
    Failed {
        /// The level.
        level: usize,
    },

    /// A scheduled transition is due and should be carried out now.
    Due(Transition),
}

#[derive(Clone, Copy, Debug)]
struct DeferredTask {
    transition: Transition,
    remaining: Duration,
    generation: u64,
}

/// Tracks the level being played and schedules what comes after it.
///
/// Every [`LevelProgression::setup`] starts a new generation. A transition scheduled under an older
/// generation is dropped instead of being run, so a delayed advance or restart can never act on a level that
/// was replaced in the meantime.
#[derive(Clone, Debug)]
pub struct LevelProgression {
    state: Option<LevelState>,
    generation: u64,
    pending: Option<DeferredTask>,
    delay: Duration,
}

impl Default for LevelProgression {
    fn default() -> Self {
        Self::new(TRANSITION_DELAY)
    }
}

impl LevelProgression {
    /// Creates a progression that waits `delay` between a level ending and the next transition.
    pub fn new(delay: Duration) -> Self {
        Self {
            state: None,
            generation: 0,
            pending: None,
            delay,
        }
    }

    /// The level being played, if any.
    pub fn state(&self) -> Option<&LevelState> {
        self.state.as_ref()
    }

    /// The transition waiting for its delay to pass, if any.
    pub fn pending(&self) -> Option<Transition> {
        self.pending.map(|task| task.transition)
    }

    /// Starts (or restarts) `level` with `blocked` blocked cells, cancelling any pending transition.
    pub fn setup(&mut self, level: usize, blocked: usize) -> &LevelState {
        self.generation += 1;
        self.pending = None;

        let state = LevelState::new(level, blocked);
        let rules = state.rules;

        log::info!(
            "Level {} rules: {} words, {} bonus, {}s",
            level,
            rules.required_words,
            rules.required_bonus,
            rules.time_limit.as_secs()
        );

        if level == CLEAR_BLOCKED_LEVEL {
            log::info!("Blocked tiles to unlock: {}", blocked);
        }

        self.state.insert(state)
    }

    /// Leaves level-play. Any pending transition is cancelled.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.state = None;
    }

    /// Records an accepted word that used `bonus_used` bonus cells.
    pub fn record_word(&mut self, bonus_used: u32) -> Option<Progress> {
        let state = self.state.as_mut()?;

        state.words_made += 1;
        state.bonus_used += bonus_used;

        log::debug!(
            "Progress: {}/{} words, bonus {}/{}",
            state.words_made,
            state.rules.required_words,
            state.bonus_used,
            state.rules.required_bonus
        );

        self.check_complete()
    }

    /// Records one blocked cell becoming unblocked.
    pub fn record_unblock(&mut self) -> Option<Progress> {
        let state = self.state.as_mut()?;

        state.remaining_blocked = state.remaining_blocked.saturating_sub(1);

        log::debug!(
            "Tile unblocked, {}/{} remaining",
            state.remaining_blocked,
            state.initial_blocked
        );

        self.check_complete()
    }

    /// Completes the level if it is still being played and every objective is met. Completion happens at
    /// most once per setup.
    pub fn check_complete(&mut self) -> Option<Progress> {
        let state = self.state.as_mut()?;

        if state.phase != LevelPhase::Playing || !state.objectives_met() {
            return None;
        }

        state.phase = LevelPhase::Completed;
        state.timer_active = false;

        let level = state.level;
        log::info!("Level {} complete", level);

        self.schedule(Transition::Advance { from: level });

        Some(Progress::Completed { level })
    }

    /// Advances the clock by `delta`: counts down the pending transition and the level timer.
    pub fn tick(&mut self, delta: Duration) -> Vec<Progress> {
        let mut progress = Vec::new();

        if let Some(mut task) = self.pending.take() {
            task.remaining = task.remaining.saturating_sub(delta);

            if task.generation != self.generation {
                log::debug!("Dropping stale transition {:?}", task.transition);
            } else if task.remaining.is_zero() {
                progress.push(Progress::Due(task.transition));
            } else {
                self.pending = Some(task);
            }
        }

        let failed = match self.state.as_mut() {
            Some(state) if state.phase == LevelPhase::Playing && state.timer_active => {
                state.remaining_time = state.remaining_time.saturating_sub(delta);

                if state.remaining_time.is_zero() {
                    state.timer_active = false;
                    state.phase = LevelPhase::Failed;
                    Some(state.level)
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Some(level) = failed {
            log::info!("Level {} failed: time's up", level);
            self.schedule(Transition::Restart { level });
            progress.push(Progress::Failed { level });
        }

        progress
    }

    fn schedule(&mut self, transition: Transition) {
        self.pending = Some(DeferredTask {
            transition,
            remaining: self.delay,
            generation: self.generation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn rule_table() {
        let table = [
            (1, 5, 0, 0),
            (2, 7, 0, 45),
            (3, 10, 0, 120),
            (4, 1, 4, 0),
            (5, 1, 4, 0),
            (6, 15, 0, 35),
            (7, 17, 0, 30),
            (10, 23, 0, 30),
        ];

        for (level, words, bonus, time) in table {
            assert_eq!(
                LevelRules::for_level(level),
                LevelRules {
                    required_words: words,
                    required_bonus: bonus,
                    time_limit: secs(time),
                },
                "level {}",
                level
            );
        }
    }

    #[test]
    fn level_one_completes_exactly_once() {
        let mut progression = LevelProgression::default();
        progression.setup(1, 0);

        for _ in 0..4 {
            assert_eq!(progression.record_word(0), None);
        }

        assert_eq!(
            progression.record_word(0),
            Some(Progress::Completed { level: 1 })
        );
        assert_eq!(progression.record_word(0), None);
        assert_eq!(
            progression.pending(),
            Some(Transition::Advance { from: 1 })
        );
    }

    #[test]
    fn advance_fires_after_the_delay() {
        let mut progression = LevelProgression::default();
        progression.setup(4, 0);
        progression.record_word(4);

        assert!(progression.tick(Duration::from_millis(1500)).is_empty());
        assert_eq!(
            progression.tick(Duration::from_millis(500)),
            vec![Progress::Due(Transition::Advance { from: 4 })]
        );
        assert_eq!(progression.pending(), None);
    }

    #[test]
    fn bonus_objective_must_be_met() {
        let mut progression = LevelProgression::default();
        progression.setup(4, 0);

        assert_eq!(progression.record_word(3), None);
        assert_eq!(
            progression.record_word(1),
            Some(Progress::Completed { level: 4 })
        );
    }

    #[test]
    fn level_five_needs_blocked_cells_cleared() {
        let mut progression = LevelProgression::default();
        progression.setup(5, 2);

        assert_eq!(progression.record_word(4), None);
        assert_eq!(progression.record_unblock(), None);
        assert_eq!(
            progression.record_unblock(),
            Some(Progress::Completed { level: 5 })
        );
    }

    #[test]
    fn level_five_needs_bonus_too() {
        let mut progression = LevelProgression::default();
        progression.setup(5, 1);

        assert_eq!(progression.record_unblock(), None);
        assert_eq!(progression.record_word(3), None);
        assert_eq!(progression.state().unwrap().phase(), LevelPhase::Playing);
        assert_eq!(
            progression.record_word(1),
            Some(Progress::Completed { level: 5 })
        );
    }

    #[test]
    fn timer_runs_out() {
        let mut progression = LevelProgression::default();
        progression.setup(2, 0);

        assert_eq!(progression.tick(secs(46)), vec![Progress::Failed { level: 2 }]);

        let state = progression.state().unwrap();
        assert!(state.remaining_time().is_zero());
        assert!(!state.timer_active());
        assert_eq!(state.phase(), LevelPhase::Failed);

        // no further failures, then the restart
        assert!(progression.tick(secs(1)).is_empty());
        assert_eq!(
            progression.tick(secs(1)),
            vec![Progress::Due(Transition::Restart { level: 2 })]
        );
    }

    #[test]
    fn words_after_failure_do_not_complete() {
        let mut progression = LevelProgression::default();
        progression.setup(2, 0);
        progression.tick(secs(45));

        for _ in 0..7 {
            assert_eq!(progression.record_word(0), None);
        }
    }

    #[test]
    fn untimed_levels_never_fail() {
        let mut progression = LevelProgression::default();
        progression.setup(1, 0);

        assert!(progression.tick(secs(10_000)).is_empty());
        assert_eq!(progression.state().unwrap().phase(), LevelPhase::Playing);
    }

    #[test]
    fn setup_cancels_the_pending_transition() {
        let mut progression = LevelProgression::default();
        progression.setup(4, 0);
        progression.record_word(4);
        assert!(progression.pending().is_some());

        progression.setup(4, 0);
        assert_eq!(progression.pending(), None);
        assert!(progression.tick(secs(5)).is_empty());
    }

    #[test]
    fn stale_tasks_are_dropped() {
        let mut progression = LevelProgression::default();
        progression.setup(4, 0);
        progression.record_word(4);

        // a task that outlived its generation must not run
        progression.generation += 1;
        assert!(progression.tick(secs(5)).is_empty());
        assert_eq!(progression.pending(), None);
    }

    #[test]
    fn objective_text() {
        let mut state = LevelState::new(5, 3);
        state.bonus_used = 1;

        assert_eq!(
            state.objective_text(),
            "Unlock all blocked tiles & use 4 bonus\nBonus: 1/4 | Blocked: 3 remaining"
        );
        assert_eq!(LevelState::new(2, 0).objective_text(), "Make 7 words in 45s\n(0/7)");
        assert_eq!(LevelState::new(8, 0).objective_text(), "Words: 0/19, Time: 30s");
    }
}
