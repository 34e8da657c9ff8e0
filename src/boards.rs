use crate::pieces::*;
use crate::positions::*;
use array_const_fn_init::array_const_fn_init;
use array_init::array_init;
use std::fmt::{self, Display};
use std::ops;

// ---------------------------------------------
// Board
// ---------------------------------------------

/// The 8x8 mailbox: one `Option<Piece>` per cell, row-major from the top
/// left. At most one piece occupies a cell, and while a game is running
/// there is exactly one king of each color on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const fn initial_cell(idx: usize) -> Option<Piece> {
    let row = idx / 8;
    let col = idx % 8;
    match row {
        0 => Some(Piece::new(Color::Black, BACK_RANK[col])),
        1 => Some(Piece::new(Color::Black, PieceKind::Pawn)),
        6 => Some(Piece::new(Color::White, PieceKind::Pawn)),
        7 => Some(Piece::new(Color::White, BACK_RANK[col])),
        _ => None,
    }
}

/// The standard starting position as a const table.
const INITIAL_CELLS: [Option<Piece>; 64] = array_const_fn_init![initial_cell; 64];

impl Board {
    pub fn empty() -> Board {
        Board {
            cells: array_init(|_| None),
        }
    }

    /// Returns a board with the figures placed on standard chess starting
    /// positions.
    pub fn standard() -> Board {
        Board {
            cells: INITIAL_CELLS,
        }
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece;
    }

    /// Moves whatever stands on `from` to `to`, clearing the origin, and
    /// returns the previous occupant of `to`. Does not check legality.
    pub fn make_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moved = self.cells[from.index()].take();
        std::mem::replace(&mut self.cells[to.index()], moved)
    }

    /// Iterates over all occupied cells.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.cells[sq.index()].map(|p| (sq, p)))
    }

    /// Scans for the king of the given color.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    /// The board as nested rows, the shape rendering collaborators consume.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        array_init(|row| array_init(|col| self.cells[row * 8 + col]))
    }
}

impl ops::Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Option<Piece> {
        &self.cells[sq.index()]
    }
}

// Displays the first 64 items from an iterator in a chessboard style:
//
//   a  b  c  d  e  f  g
// 8 i1 i2 i3 ...        8
// 7 ....
//
// Where i1,...i64 are the items of the iterator.
fn display_chessboard_style<I, C>(it: &mut I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    I: Iterator<Item = C>,
    C: Display,
{
    write!(f, " ")?;
    for c in 'a'..'i' {
        write!(f, " {}", c)?;
    }
    for row in 0..BOARD_SIZE {
        write!(f, "\n{} ", 8 - row)?;
        for _col in 0..BOARD_SIZE {
            let i = it.next().expect("Iterator ended too early");
            write!(f, "{} ", i)?;
        }
        write!(f, "{} ", 8 - row)?;
    }
    write!(f, "\n ")?;
    for c in 'a'..'i' {
        write!(f, " {}", c)?;
    }
    Ok(())
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_chessboard_style(
            &mut self.cells.iter().map(|c| match c {
                Some(p) => p.glyph(),
                None => ' ',
            }),
            f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_setup() {
        let b = Board::standard();

        for col in 0..8 {
            assert_eq!(
                b.get(Square::from_row_col(1, col)),
                Some(Piece::new(Color::Black, PieceKind::Pawn))
            );
            assert_eq!(
                b.get(Square::from_row_col(6, col)),
                Some(Piece::new(Color::White, PieceKind::Pawn))
            );
        }
        for row in 2..6 {
            for col in 0..8 {
                assert_eq!(b.get(Square::from_row_col(row, col)), None);
            }
        }

        assert_eq!(
            b.get(Square::from_row_col(0, 4)),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(
            b.get(Square::from_row_col(0, 3)),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            b.get(Square::from_row_col(7, 4)),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            b.get(Square::from_row_col(7, 0)),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(b.king_square(Color::White), Some(Square::from_row_col(7, 4)));
        assert_eq!(b.king_square(Color::Black), Some(Square::from_row_col(0, 4)));
    }

    #[test]
    fn test_make_move_returns_capture() {
        let mut b = Board::standard();
        let from = Square::from_row_col(6, 4);
        let to = Square::from_row_col(1, 4);

        let captured = b.make_move(from, to);
        assert_eq!(captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(b.get(from), None);
        assert_eq!(b.get(to), Some(Piece::new(Color::White, PieceKind::Pawn)));
    }

    #[test]
    fn test_piece_iteration_counts() {
        let b = Board::standard();
        assert_eq!(b.pieces().count(), 32);
        assert_eq!(
            b.pieces().filter(|(_, p)| p.color == Color::White).count(),
            16
        );
        assert_eq!(Board::empty().pieces().count(), 0);
    }
}
