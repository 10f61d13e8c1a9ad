use alloc::vec::Vec;

use super::*;

/// Fixed set of mine positions, for scripted boards and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    size: Coord2,
    mines: Vec<CellIndex>,
}

impl MineLayout {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let board = Board::new(size);
        let mut mines = Vec::with_capacity(mine_coords.len());

        for &coords in mine_coords {
            let index = board.index(coords).ok_or(GameError::InvalidCoords(coords))?;
            if mines.contains(&index) {
                log::warn!("Mine at {:?} listed more than once", coords);
                continue;
            }
            mines.push(index);
        }

        Ok(Self { size, mines })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len().try_into().unwrap_or(CellCount::MAX)
    }
}

impl MinefieldGenerator for MineLayout {
    /// Lays exactly the listed mines, the requested count and safe cell are not consulted.
    fn lay_mines(&mut self, board: &mut Board, _mines: CellCount, _safe: Option<CellIndex>) {
        for &index in &self.mines {
            board.set_content(index, Content::Mine);
        }
    }
}
