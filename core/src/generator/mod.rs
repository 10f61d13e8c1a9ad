use crate::*;
pub use layout::*;
pub use random::*;

mod layout;
mod random;

/// Strategy deciding where mines go.
pub trait MinefieldGenerator {
    /// Marks mine cells on a board whose content is all zero. The cell at `safe`, if any, must
    /// not receive a mine.
    fn lay_mines(&mut self, board: &mut Board, mines: CellCount, safe: Option<CellIndex>);
}

/// Clears `board`, lays mines with `generator` and computes every adjacency count.
pub fn populate<G>(
    generator: &mut G,
    board: &mut Board,
    mines: CellCount,
    safe: Option<CellIndex>,
) where
    G: MinefieldGenerator + ?Sized,
{
    board.clear_content();
    generator.lay_mines(board, mines, safe);
    fill_adjacency(board);

    let placed = board.mine_count();
    if placed != mines {
        log::warn!(
            "Generated minefield count mismatch, actual: {}, requested: {}",
            placed,
            mines
        );
    }
    log::debug!("Placed {} mines, safe cell {:?}", placed, safe);
}

/// Writes the number of adjacent mines into every non-mine cell.
pub fn fill_adjacency(board: &mut Board) {
    let (width, height) = board.size();
    for y in 0..height {
        for x in 0..width {
            let Some(index) = board.index((x, y)) else {
                continue;
            };
            if board.content(index).is_mine() {
                continue;
            }
            let count = board.adjacent_mine_count((x, y));
            board.set_content(index, Content::Count(count));
        }
    }
}
