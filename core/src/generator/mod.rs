use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// How the generator treats the cell the player is expected to open first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTile {
    #[default]
    Random,
    SimpleSafe,
    AlwaysZero,
}
