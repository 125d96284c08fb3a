#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;
mod view;

/// Board dimensions `(rows, cols)` and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GameConfig {
    /// Classic 10x10 board with 15 mines.
    pub const DEFAULT: Self = Self::new_unchecked((10, 10), 15);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON config such as `{"size": [10, 10], "mines": 15}` and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            log::warn!("Could not parse game config: {err}");
            GameError::MalformedConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || self.mines == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Where the mines are, plus the neighbor counts derived from them.
///
/// Both grids are fixed once built, a new game gets a new layout. Serialized as the bare mine mask, deserializing
/// recomputes everything else and rejects masks [`MineLayout::from_mine_mask`] would reject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    size: Coord2,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let size: Coord2 = (
            rows.try_into().map_err(|_| GameError::InvalidBoardShape)?,
            cols.try_into().map_err(|_| GameError::InvalidBoardShape)?,
        );
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .map_err(|_| GameError::TooManyMines)?;
        GameConfig::new(size, mine_count)?;

        // Counts are stored for mines too, they are simply never shown.
        let adjacent = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            NeighborIter::new((row as Coord, col as Coord), size)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8
        });

        Ok(Self {
            mine_mask,
            adjacent,
            size,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn index_of(&self, coords: Coord2) -> Result<CellIndex> {
        let coords = self.validate_coords(coords)?;
        Ok(to_linear_index(coords, self.size))
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        from_linear_index(index, self.size).ok_or(GameError::OutOfBounds)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines in the Moore neighborhood of `coords`, meaningless on a mine.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.to_nd_index()]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }
}

impl TryFrom<Array2<bool>> for MineLayout {
    type Error = GameError;

    fn try_from(mine_mask: Array2<bool>) -> Result<Self> {
        Self::from_mine_mask(mine_mask)
    }
}

impl From<MineLayout> for Array2<bool> {
    fn from(layout: MineLayout) -> Self {
        layout.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing was revealed, e.g. the cell already was.
    NoChange,
    /// Cells were revealed and the game goes on.
    Continue,
    /// A mine was revealed, the game is lost.
    MineHit,
    /// Every safe cell is now revealed.
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Continue => true,
            MineHit => true,
            Won => true,
        }
    }
}

/// Merges outcomes of a multi-cell reveal.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (MineHit, _) => MineHit,
            (_, MineHit) => MineHit,
            (Won, _) => Won,
            (_, Won) => Won,
            (Continue, _) => Continue,
            (_, Continue) => Continue,
            (NoChange, NoChange) => NoChange,
        }
    }
}
