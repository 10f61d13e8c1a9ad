use std::collections::{BTreeSet, VecDeque};

use ottsweeper_core::*;

fn revealed_cells(session: &GameSession) -> BTreeSet<CellIndex> {
    session
        .board()
        .iter_cells()
        .filter(|&(_, _, cover)| cover == Cover::Revealed)
        .map(|(index, _, _)| index)
        .collect()
}

/// Every cell a reveal at `start` should open: the edge-connected zero region and all cells
/// touching it.
fn expected_closure(board: &Board, start: CellIndex) -> BTreeSet<CellIndex> {
    let mut closure = BTreeSet::from([start]);
    if !board.content(start).is_zero() {
        return closure;
    }

    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(index) = queue.pop_front() {
        let coords = board.coords(index).unwrap();
        for neighbor in board.neighbors(coords) {
            let neighbor = board.index(neighbor).unwrap();
            closure.insert(neighbor);
            if is_orthogonal(coords, board.coords(neighbor).unwrap())
                && board.content(neighbor).is_zero()
                && seen.insert(neighbor)
            {
                queue.push_back(neighbor);
            }
        }
    }
    closure
}

fn check_adjacency(board: &Board) {
    for (index, content, _) in board.iter_cells() {
        if content.is_mine() {
            continue;
        }
        let coords = board.coords(index).unwrap();
        let mines = board
            .neighbors(coords)
            .filter(|&pos| board.content(board.index(pos).unwrap()).is_mine())
            .count();
        assert_eq!(content, Content::Count(mines as u8), "cell {:?}", coords);
    }
}

#[test]
fn playing_every_safe_cell_wins_with_consistent_counts() {
    let config = GameConfig::INTERMEDIATE;

    for seed in 0..24u64 {
        let mut session = GameSession::new(config, seed);
        let first = ((seed * 5 % 16) as Coord, (seed * 3 % 16) as Coord);

        session.reveal(first);
        let board = session.board().clone();
        let first_index = board.index(first).unwrap();
        assert_eq!(board.mine_count(), config.mines());
        assert!(!board.content(first_index).is_mine(), "seed {}", seed);
        check_adjacency(&board);

        let mut revealed = revealed_cells(&session);
        assert_eq!(revealed, expected_closure(&board, first_index));
        assert_eq!(
            session.remaining_cells(),
            config.safe_cells() - revealed.len() as CellCount
        );

        for index in 0..board.total_cells() as CellIndex {
            if session.is_finished() {
                break;
            }
            if board.content(index).is_mine() || revealed.contains(&index) {
                continue;
            }

            let before = session.remaining_cells();
            let outcome = session.reveal(board.coords(index).unwrap());
            let now_revealed = revealed_cells(&session);

            if outcome == RevealOutcome::Won {
                assert_eq!(session.remaining_cells(), 0);
                break;
            }
            assert_eq!(outcome, RevealOutcome::Revealed);

            let opened: BTreeSet<_> = now_revealed.difference(&revealed).copied().collect();
            let expected: BTreeSet<_> = expected_closure(&board, index)
                .difference(&revealed)
                .copied()
                .collect();
            assert_eq!(opened, expected, "seed {} reveal {}", seed, index);
            assert_eq!(before - session.remaining_cells(), opened.len() as CellCount);
            revealed = now_revealed;
        }

        assert_eq!(session.state(), GameState::Win, "seed {}", seed);
        assert_eq!(session.remaining_cells(), 0);
        assert!(
            (0..16)
                .flat_map(|y| (0..16).map(move |x| (x, y)))
                .all(|coords| session.visible_kind(coords) != Some(VisibleKind::Covered))
        );
    }
}

#[test]
fn resets_draw_different_boards_from_one_seed() {
    let mut session = GameSession::new(GameConfig::EXPERT, 99);
    session.reveal((0, 0));
    let first = session.board().clone();

    session.reset();
    session.reveal((0, 0));

    assert_ne!(&first, session.board());
}

#[test]
fn same_seed_replays_same_sequence() {
    let mut a = GameSession::new(GameConfig::BEGINNER, 7);
    let mut b = GameSession::new(GameConfig::BEGINNER, 7);

    for _ in 0..3 {
        a.reveal((4, 4));
        b.reveal((4, 4));
        assert_eq!(a.board(), b.board());
        a.reset();
        b.reset();
    }
}

#[test]
fn snapshot_serializes_for_renderers() {
    let mut session = GameSession::with_layout((2, 2), &[(0, 0)], 0).unwrap();
    session.reveal((0, 0));

    let json = serde_json::to_value(Snapshot::from_session(&session)).unwrap();

    assert_eq!(json["state"], "Loss");
    assert_eq!(json["size"], serde_json::json!([2, 2]));
}
