//! The letter grid: a dense, fixed-size store of cells indexed by position.

use std::{fmt::Display, ops::Index};

use array2d::Array2D;

use crate::{Error, Result};

/// A grid coordinate. Rows and columns are 0-indexed, rows count downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// The row, counting from the top.
    pub row: usize,

    /// The column, counting from the left.
    pub col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether `other` is one of the 8 cells surrounding this one. A position is not adjacent to itself.
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);

        dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
    }

    /// The in-bounds positions surrounding this one in a grid of the given size.
    pub fn neighbors(&self, num_rows: usize, num_columns: usize) -> impl Iterator<Item = Position> {
        let center = *self;

        (-1isize..=1)
            .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dr, dc)| {
                let row = center.row.checked_add_signed(dr)?;
                let col = center.col.checked_add_signed(dc)?;

                (row < num_rows && col < num_columns).then_some(Position { row, col })
            })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One square of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    letter: char,
    blocked: bool,
    bonus: bool,
    bonus_consumed: bool,
}

impl Cell {
    /// Creates a plain cell holding `letter`, which is uppercased.
    pub fn new(position: Position, letter: char) -> Self {
        Self {
            position,
            letter: uppercase(letter),
            blocked: false,
            bonus: false,
            bonus_consumed: false,
        }
    }

    /// Marks the cell as blocked or not.
    pub fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    /// Marks the cell as a bonus cell or not.
    pub fn with_bonus(mut self, bonus: bool) -> Self {
        self.bonus = bonus;
        self
    }

    /// Where the cell sits. Never changes.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The cell's letter, always uppercase.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Whether the cell is excluded from selection.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Whether the cell is a bonus cell, consumed or not.
    pub fn is_bonus(&self) -> bool {
        self.bonus
    }

    /// Whether the cell's bonus has already been counted.
    pub fn is_bonus_consumed(&self) -> bool {
        self.bonus_consumed
    }

    /// Whether the cell still carries a bonus that an accepted word would count.
    pub fn has_unused_bonus(&self) -> bool {
        self.bonus && !self.bonus_consumed
    }
}

fn uppercase(letter: char) -> char {
    letter.to_uppercase().next().unwrap_or(letter)
}

/// A rectangular grid of cells. Every position inside the dimensions holds exactly one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<Cell>,
}

impl Grid {
    /// Builds a grid from letters given in row-major order.
    pub fn from_letters(letters: &[char], num_rows: usize, num_columns: usize) -> Result<Self> {
        if num_rows == 0 || num_columns == 0 || letters.len() < num_rows * num_columns {
            return Err(Error::InvalidDimensions(num_rows, num_columns));
        }

        let cells: Vec<Cell> = letters
            .iter()
            .take(num_rows * num_columns)
            .enumerate()
            .map(|(i, &letter)| Cell::new(Position::new(i / num_columns, i % num_columns), letter))
            .collect();

        Self::from_cells(cells, num_rows, num_columns)
    }

    /// Builds a grid from cells given in row-major order. Each cell's position is reset to its slot.
    pub(crate) fn from_cells(mut cells: Vec<Cell>, num_rows: usize, num_columns: usize) -> Result<Self> {
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.position = Position::new(i / num_columns.max(1), i % num_columns.max(1));
        }

        let cells = Array2D::from_row_major(&cells, num_rows, num_columns)
            .map_err(|_| Error::InvalidDimensions(num_rows, num_columns))?;

        Ok(Self { cells })
    }

    /// The number of rows.
    pub fn num_rows(&self) -> usize {
        self.cells.num_rows()
    }

    /// The number of columns.
    pub fn num_columns(&self) -> usize {
        self.cells.num_columns()
    }

    /// Whether `position` lies inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.num_rows() && position.col < self.num_columns()
    }

    /// Gets the cell at `position`, or [`None`] if it is out of bounds.
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.row, position.col)
    }

    /// Gets the letter at `position`, or [`None`] if it is out of bounds.
    pub fn letter(&self, position: Position) -> Option<char> {
        self.get(position).map(Cell::letter)
    }

    /// The in-bounds positions surrounding `position`.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> {
        position.neighbors(self.num_rows(), self.num_columns())
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.elements_row_major_iter()
    }

    /// The number of cells that are currently blocked.
    pub fn blocked_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_blocked()).count()
    }

    /// Concatenates the letters along `path`. Out-of-bounds positions are skipped.
    pub fn word_at(&self, path: &[Position]) -> String {
        path.iter().filter_map(|&position| self.letter(position)).collect()
    }

    /// Replaces the letter at `position`. Returns false if the position is out of bounds.
    pub fn set_letter(&mut self, position: Position, letter: char) -> bool {
        match self.cells.get_mut(position.row, position.col) {
            Some(cell) => {
                cell.letter = uppercase(letter);
                true
            }
            None => false,
        }
    }

    /// Unblocks the cell at `position`. Returns true only if the cell was blocked.
    pub fn unblock(&mut self, position: Position) -> bool {
        match self.cells.get_mut(position.row, position.col) {
            Some(cell) if cell.blocked => {
                cell.blocked = false;
                true
            }
            _ => false,
        }
    }

    /// Consumes the bonus of the cell at `position`. Returns true only if an unused bonus was consumed.
    pub fn consume_bonus(&mut self, position: Position) -> bool {
        match self.cells.get_mut(position.row, position.col) {
            Some(cell) if cell.has_unused_bonus() => {
                cell.bonus_consumed = true;
                true
            }
            _ => false,
        }
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[(position.row, position.col)]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows_iter() {
            let mut first = true;

            for cell in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;

                if cell.is_blocked() {
                    f.write_str("#")?;
                } else {
                    f.write_fmt(format_args!("{}", cell.letter()))?;
                }
            }

            f.write_str("\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_letters(&['c', 'a', 't', 'r', 'e', 's'], 2, 3).unwrap()
    }

    #[test]
    fn adjacency_is_chebyshev_distance_one() {
        let center = Position::new(1, 1);

        assert!(center.is_adjacent(Position::new(0, 0)));
        assert!(center.is_adjacent(Position::new(2, 2)));
        assert!(center.is_adjacent(Position::new(1, 2)));
        assert!(!center.is_adjacent(center));
        assert!(!center.is_adjacent(Position::new(3, 1)));
        assert!(!Position::new(0, 0).is_adjacent(Position::new(0, 2)));
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let corner: Vec<_> = Position::new(0, 0).neighbors(3, 3).collect();
        assert_eq!(
            corner,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );

        assert_eq!(Position::new(1, 1).neighbors(3, 3).count(), 8);
        assert_eq!(Position::new(2, 2).neighbors(3, 3).count(), 3);
    }

    #[test]
    fn cells_know_their_positions() {
        let grid = grid();

        for row in 0..grid.num_rows() {
            for col in 0..grid.num_columns() {
                let position = Position::new(row, col);
                assert_eq!(grid[position].position(), position);
            }
        }

        assert_eq!(grid.letter(Position::new(1, 0)), Some('R'));
        assert_eq!(grid.letter(Position::new(2, 0)), None);
    }

    #[test]
    fn word_at_reads_the_path() {
        let grid = grid();
        let path = [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)];
        assert_eq!(grid.word_at(&path), "CAT");
    }

    #[test]
    fn too_few_letters_is_an_error() {
        assert_eq!(
            Grid::from_letters(&['a', 'b'], 2, 2),
            Err(Error::InvalidDimensions(2, 2))
        );
        assert_eq!(
            Grid::from_letters(&[], 0, 3),
            Err(Error::InvalidDimensions(0, 3))
        );
    }

    #[test]
    fn unblock_and_bonus_flags() {
        let cells = vec![
            Cell::new(Position::new(0, 0), 'a').with_blocked(true),
            Cell::new(Position::new(0, 0), 'b').with_bonus(true),
        ];
        let mut grid = Grid::from_cells(cells, 1, 2).unwrap();

        assert_eq!(grid.blocked_count(), 1);
        assert!(grid.unblock(Position::new(0, 0)));
        assert!(!grid.unblock(Position::new(0, 0)));
        assert_eq!(grid.blocked_count(), 0);

        let bonus = Position::new(0, 1);
        assert_eq!(grid[bonus].position(), bonus);
        assert!(grid[bonus].has_unused_bonus());
        assert!(grid.consume_bonus(bonus));
        assert!(!grid.consume_bonus(bonus));
        assert!(grid[bonus].is_bonus_consumed());
    }

    #[test]
    fn display_marks_blocked_cells() {
        let cells = vec![
            Cell::new(Position::new(0, 0), 'a').with_blocked(true),
            Cell::new(Position::new(0, 0), 'b'),
        ];
        let grid = Grid::from_cells(cells, 1, 2).unwrap();
        assert_eq!(grid.to_string(), "# B\n");
    }
}
