use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniform placement without replacement. Can optionally keep the start cell, or the start cell and all its
/// neighbors, free of mines; other than that it is purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_start(seed, (0, 0), StartTile::Random)
    }

    pub fn with_start(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
        }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use StartTile::*;
        use rand::prelude::*;

        config.validate()?;
        let size = config.size;

        let start_tile = if in_bounds(self.start, size) {
            self.start_tile
        } else {
            if self.start_tile != Random {
                log::warn!("Start cell {:?} is off the board, fallback to random", self.start);
            }
            Random
        };

        let neighborhood: Vec<Coord2> = NeighborIter::new(self.start, size).collect();
        let actual_start_tile = match start_tile {
            Random => Random,
            // validation leaves at least one safe cell
            SimpleSafe => SimpleSafe,
            AlwaysZero if config.mines + 1 + neighborhood.len() as CellCount > config.total_cells() => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        };

        let mut excluded: Array2<bool> = Array2::default(size.to_nd_index());
        match actual_start_tile {
            Random => {}
            SimpleSafe => {
                excluded[self.start.to_nd_index()] = true;
            }
            AlwaysZero => {
                excluded[self.start.to_nd_index()] = true;
                for coords in &neighborhood {
                    excluded[coords.to_nd_index()] = true;
                }
            }
        }

        let mut candidates: Vec<Coord2> = excluded
            .indexed_iter()
            .filter(|&(_, &skip)| !skip)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect();

        // partial Fisher-Yates: the first `mines` candidates are distinct and uniformly chosen
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, config.mines.into());

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for coords in chosen.iter() {
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask)?;
        log::debug!(
            "Generated {}x{} layout with {} mines, start tile {:?}",
            size.0,
            size.1,
            layout.mine_count(),
            actual_start_tile
        );
        Ok(layout)
    }
}
