// For testing purposes: easily creates a board with pieces placed on the
// given (row, col) cells.
#[macro_export]
macro_rules! board {
    ( $( ($row:expr, $col:expr) => $color:ident $kind:ident ),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut base = $crate::boards::Board::empty();
            $(
                base.set(
                    $crate::positions::Square::from_row_col($row, $col),
                    Some($crate::pieces::Piece::new(
                        $crate::pieces::Color::$color,
                        $crate::pieces::PieceKind::$kind,
                    )),
                );
            )*
            base
        }
    };
}

// Functions relevant for tests

/// Fills roughly a quarter of the board with random pieces. Kings included,
/// in whatever number the dice produce; geometry checks do not care.
#[cfg(test)]
pub fn random_board(rng: &mut impl rand::Rng) -> crate::boards::Board {
    use crate::pieces::{Color, Piece, PieceKind};
    use crate::positions::Square;

    const KINDS: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    let mut board = crate::boards::Board::empty();
    for sq in Square::all() {
        if rng.gen_range(0..4) == 0 {
            let color = if rng.gen() { Color::White } else { Color::Black };
            let kind = KINDS[rng.gen_range(0..KINDS.len())];
            board.set(sq, Some(Piece::new(color, kind)));
        }
    }
    board
}
