use crate::attacks::square_attacked;
use crate::boards::Board;
use crate::pieces::*;
use crate::positions::Square;
use std::fmt;

// ---------------------------------------------
// Castling rights and preconditions
// ---------------------------------------------

/// Column the king starts on for both colors.
pub const KING_HOME_COL: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// Column the king ends up on.
    pub const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    /// Column the castling rook starts on.
    pub const fn rook_home_col(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    /// Column the castling rook ends up on.
    pub const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }

    /// Columns strictly between the king's and the rook's starting files,
    /// all of which must be empty.
    pub fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[1, 2, 3],
        }
    }

    /// Columns the king passes through, destination included, none of which
    /// may be attacked.
    pub fn transit_cols(self) -> &'static [u8] {
        match self {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[3, 2],
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::King => write!(f, "king side"),
            CastleSide::Queen => write!(f, "queen side"),
        }
    }
}

/// Castling availability for one color. Rights only ever get retired, never
/// re-granted: once the king or the relevant rook has moved, the flag stays
/// cleared for the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    king_side: bool,
    queen_side: bool,
}

impl CastlingRights {
    pub const fn initial() -> CastlingRights {
        CastlingRights {
            king_side: true,
            queen_side: true,
        }
    }

    pub const fn none() -> CastlingRights {
        CastlingRights {
            king_side: false,
            queen_side: false,
        }
    }

    /// Rights justified by piece placement alone: the king on its home
    /// square and the rook on the matching corner. Used when a game is set
    /// up from an arbitrary position.
    pub fn derived(board: &Board, color: Color) -> CastlingRights {
        let row = color.home_row();
        let king_home = board.get(Square::from_row_col(row, KING_HOME_COL))
            == Some(Piece::new(color, PieceKind::King));
        if !king_home {
            return CastlingRights::none();
        }
        let rook_at = |side: CastleSide| {
            board.get(Square::from_row_col(row, side.rook_home_col()))
                == Some(Piece::new(color, PieceKind::Rook))
        };
        CastlingRights {
            king_side: rook_at(CastleSide::King),
            queen_side: rook_at(CastleSide::Queen),
        }
    }

    pub fn allows(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::King => self.king_side,
            CastleSide::Queen => self.queen_side,
        }
    }

    pub fn retire(&mut self, side: CastleSide) {
        match side {
            CastleSide::King => self.king_side = false,
            CastleSide::Queen => self.queen_side = false,
        }
    }

    pub fn retire_both(&mut self) {
        self.king_side = false;
        self.queen_side = false;
    }
}

/// Retires whatever rights a committed move invalidates: any king move
/// clears both flags of its color, a rook moving off its original corner
/// clears that corner's side.
pub fn retire_rights_for_move(rights: &mut ByColor<CastlingRights>, piece: Piece, from: Square) {
    match piece.kind {
        PieceKind::King => rights[piece.color].retire_both(),
        PieceKind::Rook => {
            if from.row() == piece.color.home_row() {
                for &side in &[CastleSide::King, CastleSide::Queen] {
                    if from.col() == side.rook_home_col() {
                        rights[piece.color].retire(side);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Checks the full castling precondition set for one color and side:
/// the right is still held, the rook still stands on its corner, the squares
/// between king and rook are empty, the king is not currently in check, and
/// no square the king crosses (destination included) is attacked. The last
/// part is probed by placing the king on each transit square of a scratch
/// board and asking the attack detector.
pub fn can_castle(board: &Board, rights: &CastlingRights, color: Color, side: CastleSide) -> bool {
    if !rights.allows(side) {
        return false;
    }

    let row = color.home_row();
    let king_from = Square::from_row_col(row, KING_HOME_COL);
    let rook_from = Square::from_row_col(row, side.rook_home_col());
    debug_assert!(
        board.get(king_from) == Some(Piece::new(color, PieceKind::King)),
        "castling right held but king not on {}",
        king_from
    );

    if board.get(rook_from) != Some(Piece::new(color, PieceKind::Rook)) {
        return false;
    }
    if side
        .between_cols()
        .iter()
        .any(|&col| board.get(Square::from_row_col(row, col)).is_some())
    {
        return false;
    }

    let enemy = color.opposite();
    if square_attacked(board, king_from, enemy) {
        return false;
    }
    for &col in side.transit_cols() {
        let transit = Square::from_row_col(row, col);
        let mut probe = *board;
        probe.make_move(king_from, transit);
        if square_attacked(&probe, transit, enemy) {
            return false;
        }
    }
    true
}
