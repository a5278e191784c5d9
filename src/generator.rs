//! Initial grid construction, either by randomly placing seed words (free-play) or by materializing an
//! authored level layout (level-play).

use std::ops::RangeInclusive;

use array2d::Array2D;
use rand::{seq::SliceRandom, Rng};

use crate::{
    level_data::{LevelRecord, TileKind},
    letters::LetterPool,
    Cell, Error, Grid, Position, Result,
};

/// The direction a seed word is placed in inside the grid. Only forward-reading directions are used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordDirection {
    /// The word goes right from the start position.
    Right,

    /// The word goes down from the start position.
    Down,

    /// The word goes diagonally down and right from the start position.
    DiagonalDownRight,

    /// The word goes diagonally up and right from the start position.
    DiagonalUpRight,
}

impl WordDirection {
    /// Returns a random direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        use WordDirection::*;

        match rng.gen_range(0..4) {
            0 => Right,
            1 => Down,
            2 => DiagonalDownRight,
            _ => DiagonalUpRight,
        }
    }

    /// The (row, column) step taken for each successive letter.
    pub fn offset(self) -> (isize, isize) {
        use WordDirection::*;

        match self {
            Right => (0, 1),
            Down => (1, 0),
            DiagonalDownRight => (1, 1),
            DiagonalUpRight => (-1, 1),
        }
    }
}

/// Describes where a word's letters are placed in the grid: a beginning coordinate, a length and a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSpan {
    /// The position of the word's first letter.
    pub begin: Position,

    /// The length of the word in letters.
    pub len: usize,

    /// The direction that the word goes in.
    pub direction: WordDirection,
}

impl WordSpan {
    /// Creates a new [WordSpan] with the given beginning, length and direction.
    pub fn new(begin: Position, len: usize, direction: WordDirection) -> Self {
        Self {
            begin,
            len,
            direction,
        }
    }

    /// Returns the grid positions the word covers, first letter first. Positions that would fall off the
    /// top or left edge are skipped, so check [`WordSpan::in_bounds`] first.
    pub fn indices(&self) -> Vec<Position> {
        let (dr, dc) = self.direction.offset();

        (0..self.len as isize)
            .filter_map(|i| {
                let row = self.begin.row.checked_add_signed(dr * i)?;
                let col = self.begin.col.checked_add_signed(dc * i)?;
                Some(Position::new(row, col))
            })
            .collect()
    }

    fn end_coordinate(&self) -> (isize, isize) {
        let (dr, dc) = self.direction.offset();
        let steps = self.len as isize - 1;

        (
            self.begin.row as isize + dr * steps,
            self.begin.col as isize + dc * steps,
        )
    }

    /// Returns whether both ends of the span are inside a grid of the given dimensions.
    pub fn in_bounds(&self, num_rows: usize, num_columns: usize) -> bool {
        let end = self.end_coordinate();

        self.len > 0
            && self.begin.row < num_rows
            && self.begin.col < num_columns
            && end.0 >= 0
            && end.1 >= 0
            && (end.0 as usize) < num_rows
            && (end.1 as usize) < num_columns
    }
}

/// Settings for a seeded grid. See [`GridGenerator::seeded`].
#[derive(Clone, Debug)]
pub struct SeededConfig<'a> {
    /// The number of rows.
    pub num_rows: usize,

    /// The number of columns.
    pub num_columns: usize,

    /// Candidate words to hide in the grid. They are shuffled and a random number of them is placed.
    pub seed_words: &'a [String],

    /// The pool that fills every cell not covered by a seed word.
    pub letters: &'a LetterPool,

    /// How many seed words to try to place. The actual count is drawn uniformly from this range.
    pub words_to_place: RangeInclusive<usize>,

    /// How many random placements to try per word before giving up on it.
    pub max_attempts: usize,
}

/// A freshly seeded grid, with the seed words that were successfully placed.
#[derive(Clone, Debug)]
pub struct SeededGrid {
    /// The generated grid.
    pub grid: Grid,

    /// Each placed word together with where it was placed.
    pub placements: Vec<(String, WordSpan)>,
}

/// Builds grids.
pub struct GridGenerator;

impl GridGenerator {
    /// Generates a grid by hiding some seed words and filling the rest with weighted random letters.
    ///
    /// The seed list is shuffled and a random number of words is drawn from `config.words_to_place`. Each
    /// word gets up to `config.max_attempts` random placements: a random anchor and a random
    /// [WordDirection]. A placement is rejected if the word runs off the grid or if it crosses a cell
    /// already holding a different letter. Crossing a cell with the same letter is allowed. Words that
    /// never fit are skipped, so placement is best-effort.
    pub fn seeded<R: Rng + ?Sized>(config: &SeededConfig<'_>, rng: &mut R) -> Result<SeededGrid> {
        let (num_rows, num_columns) = (config.num_rows, config.num_columns);

        if num_rows == 0 || num_columns == 0 {
            return Err(Error::InvalidDimensions(num_rows, num_columns));
        }

        let (min_words, max_words) = (*config.words_to_place.start(), *config.words_to_place.end());
        if min_words > max_words {
            return Err(Error::InvalidSeedWordRange(min_words, max_words));
        }

        let mut slots: Array2D<Option<char>> = Array2D::filled_with(None, num_rows, num_columns);

        let mut words: Vec<String> = config
            .seed_words
            .iter()
            .map(|word| word.trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();
        words.shuffle(rng);

        let count = rng.gen_range(min_words..=max_words);
        let mut placements = Vec::with_capacity(count);

        for word in words.into_iter().take(count) {
            match Self::try_place(&mut slots, &word, config.max_attempts, rng) {
                Some(span) => placements.push((word, span)),
                None => log::debug!(
                    "Skipped seed word {} after {} placement attempts",
                    word,
                    config.max_attempts
                ),
            }
        }

        let letters: Vec<char> = slots
            .elements_row_major_iter()
            .map(|slot| slot.unwrap_or_else(|| config.letters.sample(rng)))
            .collect();

        let grid = Grid::from_letters(&letters, num_rows, num_columns)?;

        log::info!(
            "Seeded grid built with {} tiles and {} placed words",
            num_rows * num_columns,
            placements.len()
        );

        Ok(SeededGrid { grid, placements })
    }

    fn try_place<R: Rng + ?Sized>(
        slots: &mut Array2D<Option<char>>,
        word: &str,
        max_attempts: usize,
        rng: &mut R,
    ) -> Option<WordSpan> {
        let (num_rows, num_columns) = (slots.num_rows(), slots.num_columns());
        let letters: Vec<char> = word.chars().collect();

        for _ in 0..max_attempts {
            let begin = Position::new(rng.gen_range(0..num_rows), rng.gen_range(0..num_columns));
            let span = WordSpan::new(begin, letters.len(), WordDirection::random(rng));

            if !span.in_bounds(num_rows, num_columns) {
                continue;
            }

            let indices = span.indices();

            let fits = indices
                .iter()
                .zip(&letters)
                .all(|(index, &ch)| slots[(index.row, index.col)].map_or(true, |existing| existing == ch));

            if !fits {
                continue;
            }

            for (index, &ch) in indices.iter().zip(&letters) {
                slots[(index.row, index.col)] = Some(ch);
            }

            return Some(span);
        }

        None
    }

    /// Materializes the authored layout of `level` (1-based) from `levels`.
    pub fn authored(levels: &[LevelRecord], level: usize) -> Result<Grid> {
        let record = level
            .checked_sub(1)
            .and_then(|index| levels.get(index))
            .ok_or(Error::LevelOutOfRange {
                level,
                available: levels.len(),
            })?;

        Self::from_record(record, level)
    }

    /// Materializes one level record. `level` is only used in error messages.
    pub fn from_record(record: &LevelRecord, level: usize) -> Result<Grid> {
        let (num_rows, num_columns) = (record.num_rows(), record.num_columns());
        let invalid = |reason: String| Error::InvalidLevelData { level, reason };

        if num_rows == 0 || num_columns == 0 {
            return Err(invalid(format!(
                "grid size {}x{} has no cells",
                num_columns, num_rows
            )));
        }

        let needed = num_rows * num_columns;
        if record.grid_data.len() < needed {
            return Err(invalid(format!(
                "grid data has {} tiles, {}x{} needs {}",
                record.grid_data.len(),
                num_columns,
                num_rows,
                needed
            )));
        }

        let mut cells = Vec::with_capacity(needed);

        for (index, tile) in record.grid_data.iter().take(needed).enumerate() {
            let letter = tile
                .letter
                .trim()
                .chars()
                .next()
                .ok_or_else(|| invalid(format!("tile {} has no letter", index)))?;

            let kind = TileKind::from_code(tile.tile_type);
            let position = Position::new(index / num_columns, index % num_columns);

            cells.push(
                Cell::new(position, letter)
                    .with_blocked(kind.is_blocked())
                    .with_bonus(kind.is_bonus()),
            );
        }

        let grid = Grid::from_cells(cells, num_rows, num_columns)?;

        log::info!("Level {} grid built: {}x{}", level, num_rows, num_columns);

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level_data::{GridSize, TileData};
    use rand::{rngs::StdRng, SeedableRng};

    fn seed_words() -> Vec<String> {
        ["CAR", "ART", "EAR", "STAR", "CARE", "REAL", "AREA", "TEAR", "CLEAR"]
            .iter()
            .map(|word| word.to_string())
            .collect()
    }

    fn config<'a>(words: &'a [String], letters: &'a LetterPool) -> SeededConfig<'a> {
        SeededConfig {
            num_rows: 4,
            num_columns: 4,
            seed_words: words,
            letters,
            words_to_place: 3..=4,
            max_attempts: 100,
        }
    }

    fn record(x: usize, y: usize, tiles: &[(i32, &str)]) -> LevelRecord {
        LevelRecord {
            grid_size: GridSize { x, y },
            grid_data: tiles
                .iter()
                .map(|&(tile_type, letter)| TileData {
                    tile_type,
                    letter: letter.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn span_indices_follow_direction() {
        let span = WordSpan::new(Position::new(3, 0), 3, WordDirection::DiagonalUpRight);
        assert_eq!(
            span.indices(),
            vec![Position::new(3, 0), Position::new(2, 1), Position::new(1, 2)]
        );
        assert!(span.in_bounds(4, 4));

        let span = WordSpan::new(Position::new(1, 0), 3, WordDirection::DiagonalUpRight);
        assert!(!span.in_bounds(4, 4));

        let span = WordSpan::new(Position::new(0, 2), 3, WordDirection::Right);
        assert!(!span.in_bounds(4, 4));
        assert!(span.in_bounds(4, 5));
    }

    #[test]
    fn placed_words_read_back() {
        let words = seed_words();
        let letters = LetterPool::default();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let seeded = GridGenerator::seeded(&config(&words, &letters), &mut rng).unwrap();

            assert!(seeded.placements.len() <= 4);

            for (word, span) in &seeded.placements {
                assert_eq!(&seeded.grid.word_at(&span.indices()), word);
            }
        }
    }

    #[test]
    fn every_cell_comes_from_the_alphabet() {
        let words = seed_words();
        let letters = LetterPool::default();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = GridGenerator::seeded(&config(&words, &letters), &mut rng)
                .unwrap()
                .grid;

            assert_eq!(grid.cells().count(), 16);
            assert!(grid.cells().all(|cell| letters.contains(cell.letter())));
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let words = seed_words();
        let letters = LetterPool::default();

        let a = GridGenerator::seeded(&config(&words, &letters), &mut StdRng::seed_from_u64(9)).unwrap();
        let b = GridGenerator::seeded(&config(&words, &letters), &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(a.grid, b.grid);
        assert_eq!(a.placements, b.placements);
    }

    #[test]
    fn words_that_cannot_fit_are_skipped() {
        let words = vec![String::from("MUCHTOOLONG")];
        let letters = LetterPool::default();
        let mut rng = StdRng::seed_from_u64(1);

        let mut config = config(&words, &letters);
        config.words_to_place = 1..=1;

        let seeded = GridGenerator::seeded(&config, &mut rng).unwrap();
        assert!(seeded.placements.is_empty());
        assert_eq!(seeded.grid.cells().count(), 16);
    }

    #[test]
    fn bad_seeded_settings_are_errors() {
        let words = seed_words();
        let letters = LetterPool::default();
        let mut rng = StdRng::seed_from_u64(1);

        let mut bad = config(&words, &letters);
        bad.num_rows = 0;
        assert!(matches!(
            GridGenerator::seeded(&bad, &mut rng),
            Err(Error::InvalidDimensions(0, 4))
        ));

        let mut bad = config(&words, &letters);
        bad.words_to_place = 4..=3;
        assert!(matches!(
            GridGenerator::seeded(&bad, &mut rng),
            Err(Error::InvalidSeedWordRange(4, 3))
        ));
    }

    #[test]
    fn authored_tiles_map_to_flags() {
        let levels = vec![record(
            3,
            2,
            &[(0, "c"), (4, "a"), (2, "t"), (3, "s"), (5, "e"), (9, "x")],
        )];
        let grid = GridGenerator::authored(&levels, 1).unwrap();

        assert_eq!((grid.num_rows(), grid.num_columns()), (2, 3));
        assert_eq!(grid.to_string(), "C A #\n# # X\n");

        assert!(grid[Position::new(0, 1)].is_bonus());
        assert!(grid[Position::new(0, 2)].is_blocked());
        assert!(grid[Position::new(1, 0)].is_blocked());
        assert!(grid[Position::new(1, 1)].is_blocked() && grid[Position::new(1, 1)].is_bonus());

        let unknown = &grid[Position::new(1, 2)];
        assert!(!unknown.is_blocked() && !unknown.is_bonus());

        assert_eq!(grid.blocked_count(), 3);
    }

    #[test]
    fn authored_level_out_of_range() {
        let levels = vec![record(1, 1, &[(0, "a")])];

        assert_eq!(
            GridGenerator::authored(&levels, 2),
            Err(Error::LevelOutOfRange {
                level: 2,
                available: 1
            })
        );
        assert!(matches!(
            GridGenerator::authored(&levels, 0),
            Err(Error::LevelOutOfRange { level: 0, .. })
        ));
    }

    #[test]
    fn truncated_grid_data_is_invalid() {
        let levels = vec![record(2, 2, &[(0, "a"), (0, "b"), (0, "c")])];

        assert!(matches!(
            GridGenerator::authored(&levels, 1),
            Err(Error::InvalidLevelData { level: 1, .. })
        ));
    }

    #[test]
    fn empty_letter_is_invalid() {
        let levels = vec![record(2, 1, &[(0, "a"), (0, " ")])];

        assert!(matches!(
            GridGenerator::authored(&levels, 1),
            Err(Error::InvalidLevelData { level: 1, .. })
        ));
    }
}
