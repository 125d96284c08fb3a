use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs at least one row, one column, and one mine")]
    InvalidConfiguration,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("Malformed game configuration")]
    MalformedConfig,
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Cell is flagged, unflag it before revealing")]
    CellFlagged,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
