use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game session, from the first reveal to a win or a loss.
///
/// A restart throws the board away and builds a new one, see [`Board::restart`].
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
    changes: Vec<Coord2>,
}

impl Board {
    /// Random board for `config`, reproducible from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomLayoutGenerator::new(seed))
    }

    pub fn with_generator<G: MineLayoutGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        Ok(Self::from_layout(generator.generate(config)?))
    }

    /// Random board seeded from the thread RNG.
    #[cfg(feature = "std")]
    pub fn initialize(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new((rows, cols), mines)?;
        Self::new(config, rand::random())
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        log::debug!(
            "New {}x{} board with {} mines",
            size.0,
            size.1,
            mine_layout.mine_count()
        );
        Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::default(),
            triggered_mine: None,
            changes: Vec::new(),
        }
    }

    /// Discards this board and deals a fresh one with the same config.
    pub fn restart(self, seed: u64) -> Result<Self> {
        Self::new(self.config(), seed)
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// The full solution. Renderers should go through [`BoardView`] instead.
    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub(crate) fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(CellView::at(self, coords))
    }

    pub fn check_win(&self) -> bool {
        self.revealed_count == self.mine_layout.safe_cell_count()
    }

    /// Drains the cells whose view changed since the last call, in the order they changed.
    pub fn take_changes(&mut self) -> Vec<Coord2> {
        core::mem::take(&mut self.changes)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_active()?;

        Ok(match self.cells[coords.to_nd_index()] {
            Hidden => {
                self.cells[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                self.changes.push(coords);
                Changed
            }
            Flagged => {
                self.cells[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                self.changes.push(coords);
                Changed
            }
            Revealed => NoChange,
        })
    }

    pub fn toggle_flag_index(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        let coords = self.mine_layout.coords_of(index)?;
        self.toggle_flag(coords)
    }

    /// Reveals a hidden cell, flooding outwards from cells with no adjacent mines.
    ///
    /// Flagged cells are refused with [`GameError::CellFlagged`], unflag them first.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_active()?;

        match self.cells[coords.to_nd_index()] {
            CellState::Hidden => Ok(self.reveal_single_cell(coords)),
            CellState::Revealed => Ok(RevealOutcome::NoChange),
            CellState::Flagged => Err(GameError::CellFlagged),
        }
    }

    pub fn reveal_index(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let coords = self.mine_layout.coords_of(index)?;
        self.reveal(coords)
    }

    /// Reveals every hidden neighbor of a revealed cell once enough of them are flagged.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_active()?;

        let satisfied = self.cells[coords.to_nd_index()].is_revealed()
            && self.mine_layout.adjacent_mine_count(coords) == self.count_flagged_neighbors(coords);

        Ok(if satisfied {
            self.mine_layout
                .iter_neighbors(coords)
                .map(|neighbor_coords| self.reveal_single_cell(neighbor_coords))
                .reduce(core::ops::BitOr::bitor)
                .unwrap_or(RevealOutcome::NoChange)
        } else {
            RevealOutcome::NoChange
        })
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_finished() || self.cells[coords.to_nd_index()] != CellState::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.mine_layout.contains_mine(coords) {
            log::debug!("Mine hit at {:?}", coords);
            self.cells[coords.to_nd_index()] = CellState::Revealed;
            self.changes.push(coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::MineHit;
        }

        let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
        self.mark_revealed(coords);
        log::debug!("Revealed cell at {:?}, adjacent mines: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.check_win() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Continue
        }
    }

    /// Opens the zero region around `origin`, which must already be revealed.
    ///
    /// Cells are revealed as they are queued, so each is queued at most once. Neighbors of a zero cell are never
    /// mines, flagged cells are left alone.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit = VecDeque::from([origin]);
        log::trace!("Starting flood fill from {:?}", origin);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.mine_layout.iter_neighbors(visit_coords) {
                if self.cells[pos.to_nd_index()] != CellState::Hidden {
                    continue;
                }

                let count = self.mine_layout.adjacent_mine_count(pos);
                self.mark_revealed(pos);
                log::trace!("Flood revealed cell at {:?}, adjacent mines: {}", pos, count);

                if count == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()] = CellState::Revealed;
        self.revealed_count += 1;
        self.changes.push(coords);
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("Game ended: {:?}", self.state);

        if !won {
            self.expose_mines();
        }
    }

    /// Shows every mine after a loss, without counting them as revealed.
    fn expose_mines(&mut self) {
        let mines: Vec<Coord2> = self.mine_layout.iter_mines().collect();
        for coords in mines {
            match self.cells[coords.to_nd_index()] {
                CellState::Revealed => {}
                CellState::Flagged => {
                    self.flagged_count -= 1;
                    self.cells[coords.to_nd_index()] = CellState::Revealed;
                    self.changes.push(coords);
                }
                CellState::Hidden => {
                    self.cells[coords.to_nd_index()] = CellState::Revealed;
                    self.changes.push(coords);
                }
            }
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()] == CellState::Flagged)
            .count() as u8
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}
