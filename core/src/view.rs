use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer may show for one cell.
///
/// Mines only appear once the game is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine { triggered: bool },
    /// Flag left on a safe cell when the game was lost.
    Misflagged,
}

impl CellView {
    pub(crate) fn at(board: &Board, coords: Coord2) -> Self {
        use CellState::*;

        let layout = board.mine_layout();
        let has_mine = layout.contains_mine(coords);
        let cell = board.cell_at(coords);

        match (board.state(), cell, has_mine) {
            (_, Revealed, true) => Self::Mine {
                triggered: board.triggered_mine() == Some(coords),
            },
            (_, Revealed, false) => Self::Revealed(layout.adjacent_mine_count(coords)),
            (GameState::Lost, Flagged, false) => Self::Misflagged,
            (GameState::Won, Hidden, true) => Self::Flagged,
            (_, Flagged, _) => Self::Flagged,
            (_, Hidden, _) => Self::Hidden,
        }
    }
}

/// Read-only snapshot of a board, enough to draw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub mines: CellCount,
    pub mines_left: isize,
    pub state: GameState,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            CellView::at(board, (row as Coord, col as Coord))
        });

        Self {
            size,
            mines: board.total_mines(),
            mines_left: board.mines_left(),
            state: board.state(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        if in_bounds(coords, self.size) {
            Some(self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }
}
