use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board size {0}x{1}, both dimensions must be at least 1")]
    InvalidSize(Coord, Coord),
    #[error("Too many mines, requested {mines} but at most {max} fit")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
}

impl GameError {
    /// Whether the error comes from board dimensions or mine count.
    pub const fn is_invalid_configuration(self) -> bool {
        matches!(self, Self::InvalidSize(..) | Self::TooManyMines { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
