use std::error::Error;
use std::fmt;

// ---------------------------------------------
// Error Handling
// ---------------------------------------------

/// Everything that can make a move attempt fail. None of these are fatal;
/// the game state is left untouched whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChessError {
    /// Empty origin cell, or the origin piece does not belong to the player
    /// whose turn it is.
    InvalidSelection,
    /// Coordinates outside the 8x8 grid, rejected before any rule runs.
    OutOfRange { row: i16, col: i16 },
    /// The move does not match the piece's movement rule, or a sliding
    /// piece's path is obstructed.
    IllegalGeometry,
    /// The move is otherwise fine but would leave the mover's own king
    /// attacked.
    IllegalSelfCheck,
    /// One of the castling preconditions failed.
    IllegalCastling,
    /// The game has already ended in checkmate or stalemate.
    GameOver,
}

pub type ChessResult<T> = std::result::Result<T, ChessError>;

impl Error for ChessError {}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChessError::InvalidSelection => write!(f, "no piece of yours on the origin square"),
            ChessError::OutOfRange { row, col } => {
                write!(f, "coordinates ({}, {}) are off the board", row, col)
            }
            ChessError::IllegalGeometry => write!(f, "the piece cannot move that way"),
            ChessError::IllegalSelfCheck => write!(f, "the move would leave your king in check"),
            ChessError::IllegalCastling => write!(f, "castling is not possible here"),
            ChessError::GameOver => write!(f, "the game is already over"),
        }
    }
}
