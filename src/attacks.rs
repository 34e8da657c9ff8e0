use crate::boards::Board;
use crate::pieces::*;
use crate::positions::*;
use array_init::array_init;
use lazy_static::lazy_static;

// ---------------------------------------------------------------------
// Jumping piece target tables
// ---------------------------------------------------------------------

const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (2, -1),
    (1, -2),
    (-2, 1),
    (-1, -2),
    (-2, -1),
];

const KING_OFFSETS: [(i16, i16); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

/// Builds a per-square table of the squares reachable by jumping with the
/// given offsets. Board edges simply drop targets.
fn offset_target_table(offsets: &[(i16, i16)]) -> [Vec<Square>; 64] {
    array_init(|i| {
        let from = Square::from_row_col((i / 8) as u8, (i % 8) as u8);
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
            .collect()
    })
}

lazy_static! {
    static ref KNIGHT_TARGETS: [Vec<Square>; 64] = offset_target_table(&KNIGHT_OFFSETS);
    static ref KING_TARGETS: [Vec<Square>; 64] = offset_target_table(&KING_OFFSETS);
}

// ---------------------------------------------------------------------
// Pseudo-legality
// ---------------------------------------------------------------------

/// Walks from `from` towards `to` and reports whether every square strictly
/// between the two is empty. Expects `to` to lie on a rook or bishop line
/// from `from`.
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let d = to - from;
    let row_step = d.rows.signum();
    let col_step = d.cols.signum();

    let mut current = from.offset(row_step, col_step);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if board.get(sq).is_some() {
            return false;
        }
        current = sq.offset(row_step, col_step);
    }
    true
}

/// Whether the piece standing on `from` could move to `to` by its movement
/// rule alone, ignoring king safety. Pure in board and coordinates; whose
/// turn it is does not enter into it, which lets the attack detector reuse
/// this for the opponent.
///
/// Two-square king moves are not handled here; castling has its own
/// precondition set.
pub fn pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return false,
    };
    // A same-color occupant forbids the move for every kind, and covers
    // from == to.
    if let Some(target) = board.get(to) {
        if target.color == piece.color {
            return false;
        }
    }

    let d = to - from;
    match piece.kind {
        PieceKind::Pawn => pawn_pseudo_legal(board, piece.color, from, to, d),
        PieceKind::Knight => KNIGHT_TARGETS[from.index()].contains(&to),
        PieceKind::Bishop => d.is_diagonal() && path_clear(board, from, to),
        PieceKind::Rook => d.is_straight() && path_clear(board, from, to),
        PieceKind::Queen => (d.is_diagonal() || d.is_straight()) && path_clear(board, from, to),
        PieceKind::King => KING_TARGETS[from.index()].contains(&to),
    }
}

fn pawn_pseudo_legal(board: &Board, color: Color, from: Square, to: Square, d: Delta) -> bool {
    let dir = color.pawn_direction();

    if d.cols == 0 {
        // Straight ahead never captures.
        if board.get(to).is_some() {
            return false;
        }
        if d.rows == dir {
            return true;
        }
        if d.rows == 2 * dir && from.row() == color.pawn_start_row() {
            // The intermediate square must be free as well.
            return from
                .offset(dir, 0)
                .map_or(false, |mid| board.get(mid).is_none());
        }
        false
    } else if d.cols.abs() == 1 && d.rows == dir {
        // Diagonal only as a capture; the same-color case is already gone.
        board.get(to).is_some()
    } else {
        false
    }
}

// ---------------------------------------------------------------------
// Attack detection
// ---------------------------------------------------------------------

/// Whether any piece of `by` could land on `target` with its next move.
/// Deliberately free of self-check filtering: "attacked" means reachable by
/// movement rule, which is what both king safety and castling transit
/// checks need, and filtering here would recurse forever.
pub fn square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces()
        .any(|(from, piece)| piece.color == by && pseudo_legal(board, from, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use crate::utils::random_board;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    const TEST_SEED: u64 = 42;

    fn sq(row: u8, col: u8) -> Square {
        Square::from_row_col(row, col)
    }

    #[test]
    fn test_knight_targets_table() {
        assert_eq!(KNIGHT_TARGETS[sq(0, 0).index()].len(), 2);
        assert_eq!(KNIGHT_TARGETS[sq(4, 4).index()].len(), 8);
        assert!(KNIGHT_TARGETS[sq(4, 4).index()].contains(&sq(2, 5)));
        assert!(!KNIGHT_TARGETS[sq(4, 4).index()].contains(&sq(3, 4)));
    }

    #[test]
    fn test_king_targets_table() {
        assert_eq!(KING_TARGETS[sq(0, 0).index()].len(), 3);
        assert_eq!(KING_TARGETS[sq(4, 4).index()].len(), 8);
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let b = board![
            (4, 4) => White Knight,
            (3, 4) => White Pawn,
            (3, 5) => Black Pawn,
            (4, 5) => White Pawn,
        ];
        assert!(pseudo_legal(&b, sq(4, 4), sq(2, 5)));
        assert!(pseudo_legal(&b, sq(4, 4), sq(6, 3)));
        assert!(!pseudo_legal(&b, sq(4, 4), sq(4, 6)));
    }

    #[test]
    fn test_same_color_destination_is_never_legal() {
        let b = board![
            (4, 4) => White Queen,
            (4, 7) => White Pawn,
            (0, 0) => White Bishop,
        ];
        assert!(!pseudo_legal(&b, sq(4, 4), sq(4, 7)));
        assert!(!pseudo_legal(&b, sq(4, 4), sq(0, 0)));
        // Null moves die on the same check.
        assert!(!pseudo_legal(&b, sq(4, 4), sq(4, 4)));
    }

    #[test]
    fn test_sliders_blocked_by_path() {
        let b = board![
            (4, 4) => White Bishop,
            (3, 5) => White Pawn,
            (4, 0) => White Rook,
            (2, 4) => Black Pawn,
        ];
        // Bishop towards the blocked diagonal.
        assert!(!pseudo_legal(&b, sq(4, 4), sq(2, 6)));
        assert!(!pseudo_legal(&b, sq(4, 4), sq(3, 5)));
        // Other diagonals stay open.
        assert!(pseudo_legal(&b, sq(4, 4), sq(0, 0)));
        assert!(pseudo_legal(&b, sq(4, 4), sq(7, 7)));
        // The rook may capture the blocker but not pass it.
        assert!(pseudo_legal(&b, sq(4, 0), sq(4, 3)));
        assert!(!pseudo_legal(&b, sq(4, 0), sq(4, 5)));
        assert!(!pseudo_legal(&b, sq(4, 0), sq(3, 1)));
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let b = board![(4, 4) => Black Queen];
        assert!(pseudo_legal(&b, sq(4, 4), sq(4, 0)));
        assert!(pseudo_legal(&b, sq(4, 4), sq(0, 4)));
        assert!(pseudo_legal(&b, sq(4, 4), sq(1, 1)));
        assert!(!pseudo_legal(&b, sq(4, 4), sq(2, 5)));
    }

    #[test]
    fn test_pawn_moves() {
        let b = board![
            (6, 3) => White Pawn,
            (3, 5) => Black Pawn,
            (4, 4) => White Pawn,
        ];
        // Single and double step from the start row.
        assert!(pseudo_legal(&b, sq(6, 3), sq(5, 3)));
        assert!(pseudo_legal(&b, sq(6, 3), sq(4, 3)));
        // Double step away from the start row is gone.
        assert!(!pseudo_legal(&b, sq(4, 4), sq(2, 4)));
        // Backwards and sideways never work.
        assert!(!pseudo_legal(&b, sq(4, 4), sq(5, 4)));
        assert!(!pseudo_legal(&b, sq(4, 4), sq(4, 3)));
        // Diagonal only onto an enemy piece.
        assert!(pseudo_legal(&b, sq(4, 4), sq(3, 5)));
        assert!(!pseudo_legal(&b, sq(4, 4), sq(3, 3)));
        // Black moves the other way.
        assert!(pseudo_legal(&b, sq(3, 5), sq(4, 4)));
        assert!(!pseudo_legal(&b, sq(3, 5), sq(2, 5)));
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        let single_block = board![
            (6, 0) => White Pawn,
            (5, 0) => Black Knight,
        ];
        assert!(!pseudo_legal(&single_block, sq(6, 0), sq(4, 0)));
        assert!(!pseudo_legal(&single_block, sq(6, 0), sq(5, 0)));

        let far_block = board![
            (6, 0) => White Pawn,
            (4, 0) => Black Knight,
        ];
        assert!(pseudo_legal(&far_block, sq(6, 0), sq(5, 0)));
        assert!(!pseudo_legal(&far_block, sq(6, 0), sq(4, 0)));
    }

    #[test]
    fn test_square_attacked_by_rook_and_blocker() {
        let open = board![
            (1, 4) => White Rook,
            (0, 4) => Black King,
        ];
        assert!(square_attacked(&open, sq(0, 4), Color::White));
        assert!(!square_attacked(&open, sq(0, 4), Color::Black));

        let blocked = board![
            (4, 4) => White Rook,
            (2, 4) => Black Pawn,
            (0, 4) => Black King,
        ];
        assert!(!square_attacked(&blocked, sq(0, 4), Color::White));
        assert!(square_attacked(&blocked, sq(2, 4), Color::White));
    }

    #[test]
    fn test_square_attacked_by_pawn_needs_occupant() {
        let b = board![
            (4, 4) => White Pawn,
            (3, 5) => Black Rook,
        ];
        // The rook stands on a capture square, so it is attacked; the empty
        // diagonal is not, and neither is the square straight ahead.
        assert!(square_attacked(&b, sq(3, 5), Color::White));
        assert!(!square_attacked(&b, sq(3, 3), Color::White));
        assert!(!square_attacked(&b, sq(3, 4), Color::White));
    }

    #[test]
    fn test_square_attacked_by_king_and_knight() {
        let b = board![
            (7, 4) => White King,
            (5, 5) => Black Knight,
        ];
        assert!(square_attacked(&b, sq(6, 4), Color::White));
        assert!(!square_attacked(&b, sq(5, 4), Color::White));
        assert!(square_attacked(&b, sq(7, 4), Color::Black));
        assert!(square_attacked(&b, sq(6, 3), Color::Black));
        assert!(!square_attacked(&b, sq(6, 4), Color::Black));
    }

    // Reference rules written out the slow way, to pin the fast path against.

    fn slow_between_empty(board: &Board, from: Square, to: Square) -> bool {
        let d = to - from;
        let steps = d.rows.abs().max(d.cols.abs());
        for i in 1..steps {
            let sq = from
                .offset(i * d.rows.signum(), i * d.cols.signum())
                .expect("intermediate square left the board");
            if board.get(sq).is_some() {
                return false;
            }
        }
        true
    }

    fn slow_pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
        let piece = match board.get(from) {
            Some(p) => p,
            None => return false,
        };
        if board.get(to).map(|t| t.color) == Some(piece.color) {
            return false;
        }
        let d = to - from;
        let (ar, ac) = (d.rows.abs(), d.cols.abs());
        match piece.kind {
            PieceKind::Knight => (ar, ac) == (2, 1) || (ar, ac) == (1, 2),
            PieceKind::King => ar <= 1 && ac <= 1 && (ar, ac) != (0, 0),
            PieceKind::Bishop => ar == ac && ar != 0 && slow_between_empty(board, from, to),
            PieceKind::Rook => {
                (d.rows == 0) != (d.cols == 0) && slow_between_empty(board, from, to)
            }
            PieceKind::Queen => {
                (ar == ac && ar != 0 || (d.rows == 0) != (d.cols == 0))
                    && slow_between_empty(board, from, to)
            }
            PieceKind::Pawn => {
                let dir = piece.color.pawn_direction();
                if ac == 0 && d.rows == dir {
                    board.get(to).is_none()
                } else if ac == 0 && d.rows == 2 * dir && from.row() == piece.color.pawn_start_row()
                {
                    board.get(to).is_none() && slow_between_empty(board, from, to)
                } else if ac == 1 && d.rows == dir {
                    board.get(to).is_some()
                } else {
                    false
                }
            }
        }
    }

    #[test]
    fn test_pseudo_legal_matches_reference_on_random_boards() {
        let mut rng = SmallRng::seed_from_u64(TEST_SEED);
        for _ in 0..100 {
            let b = random_board(&mut rng);
            for _ in 0..200 {
                let from = sq(rng.gen_range(0..8), rng.gen_range(0..8));
                let to = sq(rng.gen_range(0..8), rng.gen_range(0..8));
                assert_eq!(
                    pseudo_legal(&b, from, to),
                    slow_pseudo_legal(&b, from, to),
                    "disagreement for {:?} -> {:?} on\n{}",
                    from,
                    to,
                    b
                );
            }
        }
    }
}
