#[macro_use]
extern crate impl_ops;

pub mod agents;
pub mod attacks;
pub mod boards;
pub mod castling;
pub mod chess_errors;
pub mod game;
pub mod game_state;
pub mod moves;
pub mod pieces;
pub mod positions;
mod utils;

pub use crate::attacks::{pseudo_legal, square_attacked};
pub use crate::boards::Board;
pub use crate::castling::{CastleSide, CastlingRights};
pub use crate::chess_errors::{ChessError, ChessResult};
pub use crate::game::{Agent, Game};
pub use crate::game_state::{GameState, GameStatus};
pub use crate::moves::{Move, MoveOutcome, MoveType};
pub use crate::pieces::{ByColor, Color, Piece, PieceKind};
pub use crate::positions::{Delta, Square};
