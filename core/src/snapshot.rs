use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Frozen, fully settled view of a session for one rendered frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub state: GameState,
    pub remaining_cells: CellCount,
    pub mines_left: i64,
    pub time: Duration,
    /// Indexed as `[[y, x]]`.
    pub cells: Array2<VisibleKind>,
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let board = session.board();
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), VisibleKind::Covered);

        for (index, content, cover) in board.iter_cells() {
            if let Some(coords) = board.coords(index) {
                cells[coords.to_nd_index()] = VisibleKind::from_cell(content, cover);
            }
        }

        Self {
            size,
            state: session.state(),
            remaining_cells: session.remaining_cells(),
            mines_left: session.mines_left(),
            time: session.elapsed_or_final_time(),
            cells,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<VisibleKind> {
        let (x, y) = coords;
        if x < self.size.0 && y < self.size.1 {
            Some(self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// Cells row by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, VisibleKind>> {
        self.cells.rows().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_matches_session_view() {
        let mut session = GameSession::with_layout((3, 2), &[(2, 1)], 0).unwrap();
        session.reveal((0, 0));
        session.cycle_flag((2, 1));

        let snapshot = Snapshot::from_session(&session);

        assert_eq!(snapshot.size, (3, 2));
        assert_eq!(snapshot.state, GameState::Normal);
        assert_eq!(snapshot.mines_left, 0);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(snapshot.cell_at((x, y)), session.visible_kind((x, y)));
            }
        }
        assert_eq!(snapshot.cell_at((2, 1)), Some(VisibleKind::Flagged));
        assert_eq!(snapshot.cell_at((3, 0)), None);
        assert_eq!(snapshot.rows().count(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_session() {
        let mut session = GameSession::with_layout((2, 1), &[(0, 0)], 0).unwrap();
        let snapshot = Snapshot::from_session(&session);

        session.reveal((1, 0));

        assert_eq!(snapshot.cell_at((1, 0)), Some(VisibleKind::Covered));
        assert_eq!(snapshot.remaining_cells, 1);
        assert_eq!(session.remaining_cells(), 0);
    }
}
