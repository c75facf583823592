use crate::game::MAX_BOARD_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid board size {size}. Enter a number between 1 and {max}.", max = MAX_BOARD_SIZE)]
    InvalidBoardSize { size: usize },

    #[error("Invalid input '{input}'. Please enter a positive integer.")]
    NotANumber { input: String },

    #[error("Invalid input. Enter a number between 1 and {cells}.")]
    CellOutOfRange { cell: usize, cells: usize },

    #[error("That spot is already filled.")]
    CellOccupied { cell: usize },

    #[error("Input closed before the game was over")]
    InputClosed,

    #[error("No legal moves left on the board")]
    NoLegalMoves,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
