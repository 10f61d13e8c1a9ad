use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Uniform placement that keeps one chosen cell free of mines.
///
/// Holds its generator for the whole session, so every reset draws a new board while a fixed
/// seed still replays the same sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn lay_mines(&mut self, board: &mut Board, mines: CellCount, safe: Option<CellIndex>) {
        let total = usize::try_from(board.total_cells()).unwrap_or(usize::MAX);
        let mut candidates: Vec<CellIndex> =
            (0..total).filter(|&index| Some(index) != safe).collect();

        for _ in 0..mines {
            if candidates.is_empty() {
                log::warn!("Minefield already full, requested {} mines", mines);
                break;
            }
            // each draw is uniform over what is left in the pool
            let pick = self.rng.random_range(0..candidates.len());
            let index = candidates.swap_remove(pick);
            board.set_content(index, Content::Mine);
        }
    }
}
