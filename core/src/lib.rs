#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod session;
mod snapshot;
mod tile;
mod types;

/// Board dimensions and mine count, validated on construction.
///
/// Only valid configurations can be built, deserializing included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

/// Built-in levels as `(columns, rows, mines)`.
const PRESETS: [(Coord, Coord, CellCount); 9] = [
    (10, 10, 10),
    (9, 9, 10),
    (8, 8, 10),
    (16, 16, 40),
    (16, 15, 40),
    (15, 15, 40),
    (15, 14, 40),
    (15, 13, 40),
    (30, 16, 99),
];

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked((9, 9), 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked((16, 16), 40);
    pub const EXPERT: Self = Self::new_unchecked((30, 16), 99);

    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Requires a non-empty board with at least one cell left free of mines.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Result<Self> {
        if size_x == 0 || size_y == 0 {
            return Err(GameError::InvalidSize(size_x, size_y));
        }
        let total = mult(size_x, size_y);
        if mines >= total {
            return Err(GameError::TooManyMines {
                mines,
                max: total - 1,
            });
        }
        Ok(Self::new_unchecked((size_x, size_y), mines))
    }

    /// One of the numbered difficulty levels, `0..=8`.
    pub const fn preset(level: u8) -> Option<Self> {
        if (level as usize) < PRESETS.len() {
            let (columns, rows, mines) = PRESETS[level as usize];
            Some(Self::new_unchecked((columns, rows), mines))
        } else {
            None
        }
    }

    pub const fn preset_count() -> u8 {
        PRESETS.len() as u8
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether the board needs to be drawn again.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether any cell was uncovered, and so the board needs to be drawn again.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Merges outcomes of multi-cell reveals, the most significant one wins.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
