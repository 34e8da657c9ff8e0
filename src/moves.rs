use crate::castling::CastleSide;
use crate::game_state::GameStatus;
/// Describing the moves that can be done on a chessboard and what a
/// committed move changed.
use crate::pieces::*;
use crate::positions::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece: Piece,
    pub kind: MoveType,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let MoveType::Castle(side) = self.kind {
            return write!(
                f,
                "{}",
                match side {
                    CastleSide::King => "O-O",
                    CastleSide::Queen => "O-O-O",
                }
            );
        }
        write!(
            f,
            "{}{}{}{}",
            self.piece.algebraic(),
            self.start,
            if let MoveType::Capture(_) = self.kind {
                "x"
            } else {
                ""
            },
            self.end
        )
    }
}

impl Move {
    pub fn new(start: Square, end: Square, piece: Piece, kind: MoveType) -> Self {
        Move {
            start,
            end,
            piece,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveType {
    Standard,
    Capture(Piece),
    Castle(CastleSide),
}

/// What a committed move changed: the move itself, whether the pawn was
/// promoted, which kings are now in check and the game status after the
/// move. Collaborators build status text and highlights from this instead
/// of poking at internal state.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub promoted: bool,
    pub check: ByColor<bool>,
    pub status: GameStatus,
}
