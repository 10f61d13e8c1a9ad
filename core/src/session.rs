use alloc::collections::{BTreeSet, VecDeque};
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Normal -> Win
/// - Normal -> Loss
/// - Win | Loss -> Normal, only through [`GameSession::reset`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Normal,
    Win,
    Loss,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Normal
    }
}

/// One game on one board, from the first click to a win or loss.
///
/// Mines are laid lazily on the first reveal so that cell is never a mine. All input operations
/// take board coordinates and silently ignore anything outside the board or after the game
/// ended.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    generator: RandomMinefieldGenerator,
    state: GameState,
    first_reveal: bool,
    remaining_cells: CellCount,
    flagged_cells: CellCount,
    elapsed: Duration,
    final_time: Option<Duration>,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn new_game(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((width, height), mines)?;
        Ok(Self::new(config, seed))
    }

    /// Starts on a board with mines already at `mine_coords`, skipping first-click placement.
    ///
    /// Later resets go back to random placement with the same mine count.
    pub fn with_layout(size: Coord2, mine_coords: &[Coord2], seed: u64) -> Result<Self> {
        let mut layout = MineLayout::from_mine_coords(size, mine_coords)?;
        let config = GameConfig::new(layout.size(), layout.mine_count())?;
        let mut session = Self::new(config, seed);
        populate(&mut layout, &mut session.board, config.mines(), None);
        session.first_reveal = false;
        Ok(session)
    }

    fn with_generator(config: GameConfig, generator: RandomMinefieldGenerator) -> Self {
        Self {
            config,
            board: Board::new(config.size()),
            generator,
            state: GameState::default(),
            first_reveal: true,
            remaining_cells: config.safe_cells(),
            flagged_cells: 0,
            elapsed: Duration::ZERO,
            final_time: None,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether mines are still waiting for the first reveal.
    pub fn is_first_reveal(&self) -> bool {
        self.first_reveal
    }

    /// Safe cells that still have to be revealed.
    pub fn remaining_cells(&self) -> CellCount {
        self.remaining_cells
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i64 {
        i64::from(self.config.mines()) - i64::from(self.flagged_cells)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn final_time(&self) -> Option<Duration> {
        self.final_time
    }

    /// The running clock while playing, the recorded time once the game ended.
    pub fn elapsed_or_final_time(&self) -> Duration {
        self.final_time.unwrap_or(self.elapsed)
    }

    pub fn visible_kind(&self, coords: Coord2) -> Option<VisibleKind> {
        self.board.visible_kind(coords)
    }

    /// Advances the game clock, frozen once the game ended.
    pub fn tick(&mut self, delta: Duration) {
        if !self.state.is_finished() {
            self.elapsed = self.elapsed.saturating_add(delta);
        }
    }

    /// Replaces the board with a fresh covered one, mines are laid again on the next reveal.
    pub fn reset(&mut self) {
        let generator = self.generator.clone();
        *self = Self::with_generator(self.config, generator);
        log::debug!(
            "New game on {}x{} board with {} mines",
            self.config.size().0,
            self.config.size().1,
            self.config.mines()
        );
    }

    /// Covered -> Flagged -> Unknown -> Covered
    pub fn cycle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let Some(index) = self.playable_index(coords) else {
            return MarkOutcome::NoChange;
        };

        let cover = self.board.cover(index);
        let Some(next) = cover.next_mark() else {
            return MarkOutcome::NoChange;
        };

        match (cover, next) {
            (_, Cover::Flagged) => self.flagged_cells += 1,
            (Cover::Flagged, _) => self.flagged_cells -= 1,
            _ => {}
        }
        self.board.set_cover(index, next);
        log::trace!("Marked {:?} as {:?}", coords, next);
        MarkOutcome::Changed
    }

    /// Reveals a covered or question-marked cell, flood-filling from zero cells.
    ///
    /// Flagged and already revealed cells are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(index) = self.playable_index(coords) else {
            return RevealOutcome::NoChange;
        };

        match self.board.cover(index) {
            Cover::Covered | Cover::Unknown => self.reveal_cell(index),
            Cover::Flagged | Cover::Revealed => RevealOutcome::NoChange,
        }
    }

    /// Whether [`chord_reveal`](Self::chord_reveal) at `coords` would do anything.
    pub fn can_chord_reveal_at(&self, coords: Coord2) -> bool {
        if self.state.is_finished() || self.first_reveal {
            return false;
        }
        let Some(index) = self.board.index(coords) else {
            return false;
        };
        match (self.board.cover(index), self.board.content(index)) {
            (Cover::Revealed, Content::Count(count)) if count > 0 => {
                count == self.board.count_neighbors(coords, |_, cover| cover == Cover::Flagged)
            }
            _ => false,
        }
    }

    /// Reveals every covered neighbor of a revealed number once it has as many flags around.
    ///
    /// Neighbors marked as flagged or unknown are not touched.
    pub fn chord_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.can_chord_reveal_at(coords) {
            log::trace!("Chord at {:?} not applicable", coords);
            return RevealOutcome::NoChange;
        }

        let (targets, _) = self
            .board
            .neighbors_of_type(coords, |_, cover| cover == Cover::Covered);

        let mut outcome = RevealOutcome::NoChange;
        for index in targets {
            if self.state.is_finished() {
                break;
            }
            // an earlier flood fill may have opened it already
            if self.board.cover(index) == Cover::Covered {
                outcome = outcome | self.reveal_cell(index);
            }
        }
        outcome
    }

    fn playable_index(&self, coords: Coord2) -> Option<CellIndex> {
        if self.state.is_finished() {
            log::trace!("Ignoring input at {:?}, game already ended", coords);
            return None;
        }
        let index = self.board.index(coords);
        if index.is_none() {
            log::trace!("Ignoring input outside the board at {:?}", coords);
        }
        index
    }

    fn reveal_cell(&mut self, index: CellIndex) -> RevealOutcome {
        if self.first_reveal {
            populate(
                &mut self.generator,
                &mut self.board,
                self.config.mines(),
                Some(index),
            );
            self.first_reveal = false;
        }

        let content = self.board.content(index);
        self.board.set_cover(index, Cover::Revealed);

        if content.is_mine() {
            self.board.set_content(index, Content::Exploded);
            self.triggered_mine = self.board.coords(index);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let mut opened = 1;
        if content.is_zero() {
            opened += self.flood_fill(index);
        }
        self.remaining_cells = self.remaining_cells.saturating_sub(opened);
        log::debug!(
            "Revealed {} cells from {:?}, {} remaining",
            opened,
            self.board.coords(index),
            self.remaining_cells
        );

        if self.remaining_cells == 0 {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens the zero region around `start` together with its numbered border, returning how
    /// many cells were newly revealed. `start` itself must already be revealed.
    fn flood_fill(&mut self, start: CellIndex) -> CellCount {
        let mut opened = 0;
        let mut queued = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(index) = to_visit.pop_front() {
            if !self.board.content(index).is_zero() {
                continue;
            }
            let Some(coords) = self.board.coords(index) else {
                continue;
            };

            for neighbor in self.board.neighbors(coords) {
                let Some(neighbor_index) = self.board.index(neighbor) else {
                    continue;
                };

                match self.board.cover(neighbor_index) {
                    Cover::Revealed => {}
                    cover => {
                        if cover == Cover::Flagged {
                            self.flagged_cells -= 1;
                        }
                        self.board.set_cover(neighbor_index, Cover::Revealed);
                        opened += 1;
                    }
                }

                // only edge-sharing zeros extend the region
                if is_orthogonal(coords, neighbor)
                    && self.board.content(neighbor_index).is_zero()
                    && queued.insert(neighbor_index)
                {
                    to_visit.push_back(neighbor_index);
                }
            }
            log::trace!("Flood expanded {:?}", coords);
        }

        opened
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        if won {
            self.board.map_content(|content, _| {
                if content.is_mine() {
                    Content::Flagged
                } else {
                    content
                }
            });
            self.flagged_cells = self.config.mines();
            self.state = GameState::Win;
        } else {
            self.board.map_content(|content, cover| {
                if cover == Cover::Flagged && !content.is_mine() {
                    Content::Mistake
                } else {
                    content
                }
            });
            self.state = GameState::Loss;
        }
        self.board.reveal_all();
        self.final_time = Some(self.elapsed);
        log::debug!("Game ended {:?} after {:?}", self.state, self.elapsed);
    }
}
