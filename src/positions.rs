use crate::chess_errors::*;
use std::fmt::{self, Display};
use std::ops;
use std::str::FromStr;

// Chessboard squares on a 8x8 board.
//
// Rows run 0-7 top to bottom, columns 0-7 left to right, so the flat
// numbering is:
//
//     a  b  c  d  e  f  g  h
//   ---------------------------
// 8 | 0  1  2  3  4  5  6  7  | 8
// 7 | 8  9  10 11 12 13 14 15 | 7
// 6 | 16 17 18 19 20 21 22 23 | 6
// 5 | 24 25 26 27 28 29 30 31 | 5
// 4 | 32 33 34 35 36 37 38 39 | 4
// 3 | 40 41 42 43 44 45 46 47 | 3
// 2 | 48 49 50 51 52 53 54 55 | 2
// 1 | 56 57 58 59 60 61 62 63 | 1
//   ---------------------------
//    a  b  c  d  e  f  g  h
//
// ---------------------------------------------
// Squares
// ---------------------------------------------

pub const BOARD_SIZE: u8 = 8;

/// A validated board coordinate. A `Square` always lies on the board; raw
/// coordinates are checked at construction and rejected with `OutOfRange`
/// before any rule evaluation can see them.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Builds a square from row and column, rejecting coordinates outside
    /// the grid.
    pub fn new(row: i16, col: i16) -> ChessResult<Square> {
        if Square::in_board(row, col) {
            Ok(Square((row as u8) * BOARD_SIZE + col as u8))
        } else {
            Err(ChessError::OutOfRange { row, col })
        }
    }

    /// Unchecked constructor for values known valid, usable in const tables.
    pub const fn from_row_col(row: u8, col: u8) -> Square {
        Square(row * BOARD_SIZE + col)
    }

    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks if row and col belong to a legal board position.
    pub const fn in_board(row: i16, col: i16) -> bool {
        row >= 0 && col >= 0 && row < BOARD_SIZE as i16 && col < BOARD_SIZE as i16
    }

    /// The square reached by stepping `d_row`/`d_col` from here, if it is
    /// still on the board.
    pub fn offset(self, d_row: i16, d_col: i16) -> Option<Square> {
        Square::new(self.row() as i16 + d_row, self.col() as i16 + d_col).ok()
    }

    /// Allows to iterate over all squares on the board, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Square)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    /// Parses algebraic coordinates such as "e4". File letter first, rank
    /// digit second; rank 8 is row 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err_closure = || -> ChessError { ChessError::OutOfRange { row: -1, col: -1 } };
        let mut chars = s.chars();

        let file = chars.next().ok_or_else(err_closure)?;
        let rank = chars
            .next()
            .and_then(|r| r.to_digit(10))
            .ok_or_else(err_closure)?;

        if chars.next().is_some() || !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(err_closure());
        }

        let row = (8 - rank) as i16;
        let col = (file as u8 - b'a') as i16;
        Square::new(row, col)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'][self.col() as usize],
            8 - self.row(),
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self, self.row(), self.col())
    }
}

// ---------------------------------------------
// Deltas
// ---------------------------------------------

/// Signed difference between two squares, the quantity every movement rule
/// is phrased in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub rows: i16,
    pub cols: i16,
}

impl Delta {
    /// Bishop-shaped: equal nonzero magnitude on both axes.
    pub fn is_diagonal(self) -> bool {
        self.rows != 0 && self.rows.abs() == self.cols.abs()
    }

    /// Rook-shaped: exactly one axis moves.
    pub fn is_straight(self) -> bool {
        (self.rows == 0) != (self.cols == 0)
    }
}

impl_op_ex!(-|a: &Square, b: &Square| -> Delta {
    Delta {
        rows: a.row() as i16 - b.row() as i16,
        cols: a.col() as i16 - b.col() as i16,
    }
});
