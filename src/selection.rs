//! The drag-to-select state machine.

use crate::{events::GameEvent, Grid, Position};

/// Whether a selection gesture is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// No gesture in progress.
    #[default]
    Idle,

    /// The pointer is down and the path is being built.
    Selecting,
}

/// Builds a path of adjacent cells from begin/extend/release input events.
///
/// Invariants of the path: consecutive positions are 8-adjacent, no position appears twice and blocked
/// cells are never included. Re-entering a cell that is already on the path (other than the last one)
/// backtracks to it, dropping everything selected after it.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    path: Vec<Position>,
}

impl SelectionController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Whether a gesture is in progress.
    pub fn is_selecting(&self) -> bool {
        self.state == SelectionState::Selecting
    }

    /// The path so far, in selection order.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Starts a gesture at `position`. A gesture already in progress is dropped without being evaluated.
    ///
    /// A blocked or out-of-bounds start cell still starts the gesture, but with an empty path. Returns
    /// whether the cell was added.
    pub fn begin(&mut self, grid: &Grid, position: Position, events: &mut Vec<GameEvent>) -> bool {
        self.cancel(events);
        self.state = SelectionState::Selecting;
        self.extend(grid, position, events)
    }

    /// Offers `position` to the path. Returns whether the path changed.
    pub fn extend(&mut self, grid: &Grid, position: Position, events: &mut Vec<GameEvent>) -> bool {
        if !self.is_selecting() {
            return false;
        }

        if let Some(index) = self.path.iter().position(|&p| p == position) {
            if index + 1 == self.path.len() {
                return false;
            }

            for dropped in self.path.drain(index + 1..).rev() {
                events.push(GameEvent::CellHighlighted {
                    position: dropped,
                    selected: false,
                });
            }

            return true;
        }

        match grid.get(position) {
            Some(cell) if !cell.is_blocked() => {}
            _ => return false,
        }

        if let Some(last) = self.path.last() {
            if !last.is_adjacent(position) {
                log::trace!("{} is not adjacent to {}", position, last);
                return false;
            }
        }

        self.path.push(position);
        events.push(GameEvent::CellHighlighted {
            position,
            selected: true,
        });

        true
    }

    /// Ends the gesture. The finished path is handed to `evaluate`, then cleared and un-highlighted whatever
    /// the evaluation decided. Returns [`None`] without calling `evaluate` if no gesture was in progress.
    pub fn release<T, F>(&mut self, events: &mut Vec<GameEvent>, evaluate: F) -> Option<T>
    where
        F: FnOnce(&[Position], &mut Vec<GameEvent>) -> T,
    {
        if !self.is_selecting() {
            return None;
        }

        self.state = SelectionState::Idle;
        let result = evaluate(&self.path, events);
        self.clear(events);

        Some(result)
    }

    /// Drops the gesture in progress, if any, without evaluating it.
    pub fn cancel(&mut self, events: &mut Vec<GameEvent>) {
        self.state = SelectionState::Idle;
        self.clear(events);
    }

    fn clear(&mut self, events: &mut Vec<GameEvent>) {
        events.extend(self.path.drain(..).map(|position| GameEvent::CellHighlighted {
            position,
            selected: false,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    // C A T
    // R E S
    // O N #
    fn grid() -> Grid {
        let letters = ['C', 'A', 'T', 'R', 'E', 'S', 'O', 'N', 'X'];
        let cells = letters
            .iter()
            .enumerate()
            .map(|(i, &letter)| Cell::new(Position::new(i / 3, i % 3), letter).with_blocked(i == 8))
            .collect();

        Grid::from_cells(cells, 3, 3).unwrap()
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn builds_an_adjacent_path() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        assert!(selection.begin(&grid, p(0, 0), &mut events));
        assert!(selection.extend(&grid, p(0, 1), &mut events));
        assert!(selection.extend(&grid, p(1, 2), &mut events));

        assert_eq!(selection.path(), &[p(0, 0), p(0, 1), p(1, 2)]);
        assert_eq!(grid.word_at(selection.path()), "CAS");
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn non_adjacent_cells_are_ignored() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        selection.begin(&grid, p(0, 0), &mut events);
        assert!(!selection.extend(&grid, p(0, 2), &mut events));
        assert!(!selection.extend(&grid, p(2, 0), &mut events));
        assert_eq!(selection.path(), &[p(0, 0)]);
    }

    #[test]
    fn reentering_a_cell_backtracks() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        selection.begin(&grid, p(0, 0), &mut events);
        selection.extend(&grid, p(0, 1), &mut events);
        selection.extend(&grid, p(0, 2), &mut events);
        events.clear();

        assert!(selection.extend(&grid, p(0, 1), &mut events));
        assert_eq!(selection.path(), &[p(0, 0), p(0, 1)]);
        assert_eq!(
            events,
            vec![GameEvent::CellHighlighted {
                position: p(0, 2),
                selected: false
            }]
        );

        // re-entering the last cell changes nothing
        assert!(!selection.extend(&grid, p(0, 1), &mut events));
        assert_eq!(selection.path(), &[p(0, 0), p(0, 1)]);
    }

    #[test]
    fn backtracking_to_the_start_drops_everything_after_it() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        selection.begin(&grid, p(0, 0), &mut events);
        selection.extend(&grid, p(1, 1), &mut events);
        selection.extend(&grid, p(2, 1), &mut events);
        selection.extend(&grid, p(2, 0), &mut events);

        assert!(selection.extend(&grid, p(0, 0), &mut events));
        assert_eq!(selection.path(), &[p(0, 0)]);
    }

    #[test]
    fn blocked_cells_are_never_added() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        selection.begin(&grid, p(1, 1), &mut events);
        assert!(!selection.extend(&grid, p(2, 2), &mut events));
        assert_eq!(selection.path(), &[p(1, 1)]);

        // starting on a blocked cell starts an empty gesture
        assert!(!selection.begin(&grid, p(2, 2), &mut events));
        assert!(selection.is_selecting());
        assert!(selection.path().is_empty());
        assert!(selection.extend(&grid, p(0, 2), &mut events));
        assert_eq!(selection.path(), &[p(0, 2)]);
    }

    #[test]
    fn out_of_bounds_cells_are_ignored() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        selection.begin(&grid, p(2, 1), &mut events);
        assert!(!selection.extend(&grid, p(3, 1), &mut events));
        assert_eq!(selection.path(), &[p(2, 1)]);
    }

    #[test]
    fn extend_and_release_without_a_gesture_do_nothing() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        assert!(!selection.extend(&grid, p(0, 0), &mut events));
        assert_eq!(selection.release(&mut events, |_, _| ()), None);
        assert!(events.is_empty());
    }

    #[test]
    fn release_evaluates_then_clears() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        selection.begin(&grid, p(0, 0), &mut events);
        selection.extend(&grid, p(0, 1), &mut events);
        selection.extend(&grid, p(0, 2), &mut events);
        events.clear();

        let word = selection.release(&mut events, |path, _| grid.word_at(path));

        assert_eq!(word.as_deref(), Some("CAT"));
        assert_eq!(selection.state(), SelectionState::Idle);
        assert!(selection.path().is_empty());
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|event| matches!(
            event,
            GameEvent::CellHighlighted {
                selected: false,
                ..
            }
        )));
    }

    #[test]
    fn a_new_begin_replaces_the_old_gesture() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        selection.begin(&grid, p(0, 0), &mut events);
        selection.extend(&grid, p(0, 1), &mut events);
        selection.begin(&grid, p(2, 0), &mut events);

        assert_eq!(selection.path(), &[p(2, 0)]);
    }

    #[test]
    fn paths_never_repeat_cells() {
        let grid = grid();
        let mut events = Vec::new();
        let mut selection = SelectionController::new();

        let moves = [p(0, 0), p(1, 1), p(0, 1), p(1, 1), p(1, 0), p(2, 1), p(1, 1), p(1, 2), p(0, 2)];

        selection.begin(&grid, moves[0], &mut events);
        for &position in &moves[1..] {
            selection.extend(&grid, position, &mut events);

            let path = selection.path();
            for (i, a) in path.iter().enumerate() {
                assert!(!path[i + 1..].contains(a), "{:?} repeats {}", path, a);
            }
            assert!(path.windows(2).all(|pair| pair[0].is_adjacent(pair[1])));
        }
    }
}
