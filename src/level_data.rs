//! Already-decoded level records, as produced by the level data source.
//!
//! The records mirror the authored level file: a list of levels, each with a grid size and a flat,
//! row-major list of tiles. Fields the engine doesn't use are ignored when deserializing.

use serde::Deserialize;

/// The top-level level file: `{ "data": [ ...levels ] }`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct LevelDataRoot {
    /// The level records, level 1 first.
    pub data: Vec<LevelRecord>,
}

/// One authored level layout.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    /// The grid's width (`x`, columns) and height (`y`, rows).
    pub grid_size: GridSize,

    /// The tiles in row-major order. Should hold at least `x * y` entries.
    pub grid_data: Vec<TileData>,
}

/// Grid dimensions of a level record.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct GridSize {
    /// Number of columns.
    pub x: usize,

    /// Number of rows.
    pub y: usize,
}

/// One authored tile.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TileData {
    /// The raw tile type code, see [`TileKind::from_code`].
    pub tile_type: i32,

    /// The tile's letter. Only the first character is used.
    pub letter: String,
}

/// The meaning of a tile type code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// A plain letter tile.
    Normal,

    /// A tile whose letter counts toward the level's bonus objective.
    Bonus,

    /// A tile that can't be selected until a neighboring word unblocks it.
    Blocked,

    /// A blocked tile that is also a bonus tile once unblocked.
    BlockedBonus,
}

impl TileKind {
    /// Maps a raw code: 0 is normal, 4 is bonus, 2 and 3 are blocked and 5 is blocked with a bonus. Unknown
    /// codes are logged and treated as normal.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => TileKind::Normal,
            4 => TileKind::Bonus,
            2 | 3 => TileKind::Blocked,
            5 => TileKind::BlockedBonus,
            other => {
                log::warn!("Unknown tile type: {}", other);
                TileKind::Normal
            }
        }
    }

    /// Whether tiles of this kind start out blocked.
    pub fn is_blocked(self) -> bool {
        matches!(self, TileKind::Blocked | TileKind::BlockedBonus)
    }

    /// Whether tiles of this kind carry a bonus.
    pub fn is_bonus(self) -> bool {
        matches!(self, TileKind::Bonus | TileKind::BlockedBonus)
    }
}

impl LevelRecord {
    /// The number of rows in the level's grid.
    pub fn num_rows(&self) -> usize {
        self.grid_size.y
    }

    /// The number of columns in the level's grid.
    pub fn num_columns(&self) -> usize {
        self.grid_size.x
    }
}
