use crate::attacks::*;
use crate::boards::*;
use crate::castling::{self, CastleSide, CastlingRights, KING_HOME_COL};
use crate::chess_errors::*;
use crate::moves::*;
use crate::pieces::*;
use crate::positions::*;
use log::{debug, info};
use std::fmt::{self, Debug, Display};

// -------------------------------------
// Game status
// -------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate(Color),
    Stalemate,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::Ongoing
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(winner) => Some(*winner),
            _ => None,
        }
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "game in progress"),
            GameStatus::Checkmate(winner) => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

// -------------------------------------
// GameState
// -------------------------------------

/// The rule-keeping state machine. Owns the board and everything derived
/// from it: whose turn it is, king whereabouts, castling rights, the capture
/// ledgers, check flags and the game status. All mutation goes through
/// `attempt_move` (and `restart`); a failed attempt leaves every field
/// exactly as it was.
#[derive(Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    king_positions: ByColor<Square>,
    castling_rights: ByColor<CastlingRights>,
    captured_pieces: ByColor<Vec<PieceKind>>,
    check_status: ByColor<bool>,
    status: GameStatus,
    turn_count: u16,
}

/// Compact record of one raw board move, enough to restore the previous
/// position exactly. This is what speculative self-check probes roll back
/// with instead of copying the whole game state.
#[derive(Debug, Clone, Copy)]
struct UndoRecord {
    from: Square,
    to: Square,
    captured: Option<Piece>,
    prev_king: Option<(Color, Square)>,
}

fn apply_move_raw(
    board: &mut Board,
    kings: &mut ByColor<Square>,
    from: Square,
    to: Square,
) -> UndoRecord {
    let moved = board.get(from);
    debug_assert!(moved.is_some(), "no piece to move on {}", from);

    let captured = board.make_move(from, to);
    let mut prev_king = None;
    if let Some(piece) = moved {
        if piece.kind == PieceKind::King {
            prev_king = Some((piece.color, kings[piece.color]));
            kings[piece.color] = to;
        }
    }
    UndoRecord {
        from,
        to,
        captured,
        prev_king,
    }
}

fn undo_move_raw(board: &mut Board, kings: &mut ByColor<Square>, undo: &UndoRecord) {
    let moved = board.get(undo.to);
    board.set(undo.from, moved);
    board.set(undo.to, undo.captured);
    if let Some((color, sq)) = undo.prev_king {
        kings[color] = sq;
    }
}

// Public interface
impl GameState {
    /// Returns a game with the figures placed on standard chess starting
    /// positions.
    pub fn standard_setup() -> GameState {
        let mut state = GameState {
            board: Board::standard(),
            current_player: Color::White,
            king_positions: ByColor::new(
                Square::from_row_col(7, KING_HOME_COL),
                Square::from_row_col(0, KING_HOME_COL),
            ),
            castling_rights: ByColor::filled(CastlingRights::initial()),
            captured_pieces: ByColor::filled(Vec::new()),
            check_status: ByColor::filled(false),
            status: GameStatus::Ongoing,
            turn_count: 0,
        };
        state.update_status();
        state
    }

    /// Sets up a game from an arbitrary position. Returns `None` unless the
    /// board carries exactly one king per color. Castling rights are derived
    /// from piece placement alone, the conservative reading for a position
    /// with no history.
    pub fn from_position(board: Board, to_move: Color) -> Option<GameState> {
        let kings_of = |color| {
            board
                .pieces()
                .filter(|&(_, p)| p.kind == PieceKind::King && p.color == color)
                .count()
        };
        if kings_of(Color::White) != 1 || kings_of(Color::Black) != 1 {
            return None;
        }

        let mut state = GameState {
            king_positions: ByColor::new(
                board.king_square(Color::White)?,
                board.king_square(Color::Black)?,
            ),
            castling_rights: ByColor::new(
                CastlingRights::derived(&board, Color::White),
                CastlingRights::derived(&board, Color::Black),
            ),
            board,
            current_player: to_move,
            captured_pieces: ByColor::filled(Vec::new()),
            check_status: ByColor::filled(false),
            status: GameStatus::Ongoing,
            turn_count: 0,
        };
        state.update_status();
        Some(state)
    }

    /// Throws everything away and starts over from the standard position.
    pub fn restart(&mut self) {
        *self = GameState::standard_setup();
        info!("game restarted");
    }

    /// Tries to move the piece on `from` to `to`. On success the move is
    /// committed (board, ledgers, rights, turn and status all updated) and
    /// a description of what changed is returned. On any failure nothing
    /// changes and the error says why.
    ///
    /// A two-square horizontal king move is understood as a castling
    /// attempt and checked against the castling preconditions instead of
    /// the ordinary movement rules.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> ChessResult<MoveOutcome> {
        if self.status.is_over() {
            return Err(ChessError::GameOver);
        }
        let piece = self.board.get(from).ok_or(ChessError::InvalidSelection)?;
        if piece.color != self.current_player {
            return Err(ChessError::InvalidSelection);
        }

        let d = to - from;
        if piece.kind == PieceKind::King && d.rows == 0 && d.cols.abs() == 2 {
            let side = if d.cols > 0 {
                CastleSide::King
            } else {
                CastleSide::Queen
            };
            return self.attempt_castle(piece.color, side);
        }

        if !pseudo_legal(&self.board, from, to) {
            return Err(ChessError::IllegalGeometry);
        }

        // Speculate, and only keep the move if the own king stays safe.
        let undo = apply_move_raw(&mut self.board, &mut self.king_positions, from, to);
        if square_attacked(
            &self.board,
            self.king_positions[piece.color],
            piece.color.opposite(),
        ) {
            undo_move_raw(&mut self.board, &mut self.king_positions, &undo);
            return Err(ChessError::IllegalSelfCheck);
        }

        Ok(self.commit(piece, undo))
    }

    /// Whether the current player still has any legal move. Runs the same
    /// speculation as `attempt_move` over every piece and destination and
    /// stops at the first survivor.
    pub fn has_any_legal_move(&self) -> bool {
        let mut board = self.board;
        let mut kings = self.king_positions;
        let color = self.current_player;

        for (from, piece) in self.board.pieces() {
            if piece.color != color {
                continue;
            }
            for to in Square::all() {
                if !pseudo_legal(&board, from, to) {
                    continue;
                }
                let undo = apply_move_raw(&mut board, &mut kings, from, to);
                let safe = !square_attacked(&board, kings[color], color.opposite());
                undo_move_raw(&mut board, &mut kings, &undo);
                if safe {
                    return true;
                }
            }
        }
        false
    }

    /// All squares the piece on `from` may legally move to, castling
    /// destinations included. Empty when the cell is. Rendering layers use
    /// this for move highlighting, agents for move enumeration.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let piece = match self.board.get(from) {
            Some(p) => p,
            None => return Vec::new(),
        };
        let mut board = self.board;
        let mut kings = self.king_positions;
        let mut res = Vec::new();

        for to in Square::all() {
            if !pseudo_legal(&board, from, to) {
                continue;
            }
            let undo = apply_move_raw(&mut board, &mut kings, from, to);
            if !square_attacked(&board, kings[piece.color], piece.color.opposite()) {
                res.push(to);
            }
            undo_move_raw(&mut board, &mut kings, &undo);
        }

        let home = Square::from_row_col(piece.color.home_row(), KING_HOME_COL);
        if piece.kind == PieceKind::King && from == home {
            for &side in &[CastleSide::King, CastleSide::Queen] {
                if castling::can_castle(
                    &self.board,
                    &self.castling_rights[piece.color],
                    piece.color,
                    side,
                ) {
                    res.push(Square::from_row_col(
                        piece.color.home_row(),
                        side.king_target_col(),
                    ));
                }
            }
        }
        res
    }

    /// Every legal `(from, to)` pair for the current player.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        self.board
            .pieces()
            .filter(|&(_, p)| p.color == self.current_player)
            .flat_map(|(from, _)| {
                self.legal_destinations(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Plays a uniformly random legal move for the current player.
    pub fn play_random_turn(&mut self) -> ChessResult<MoveOutcome> {
        use rand::seq::SliceRandom;
        let rng = &mut rand::thread_rng();
        let moves = self.legal_moves();
        let &(from, to) = moves.choose(rng).ok_or(ChessError::GameOver)?;
        self.attempt_move(from, to)
    }
}

// Read-only queries
impl GameState {
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Nested-rows snapshot for rendering collaborators.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        self.board.grid()
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn check_status(&self) -> ByColor<bool> {
        self.check_status
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.check_status[color]
    }

    /// Pieces of `color` that the opponent has captured so far, in capture
    /// order.
    pub fn captured_pieces(&self, color: Color) -> &[PieceKind] {
        &self.captured_pieces[color]
    }

    pub fn square_attacked(&self, target: Square, by: Color) -> bool {
        square_attacked(&self.board, target, by)
    }

    pub fn material_value(&self, side: Color) -> u8 {
        self.board
            .pieces()
            .filter(|&(_, p)| p.color == side)
            .map(|(_, p)| match p.kind {
                PieceKind::Pawn => 1,
                PieceKind::Knight | PieceKind::Bishop => 3,
                PieceKind::Rook => 5,
                PieceKind::Queen => 9,
                PieceKind::King => 0,
            })
            .sum()
    }
}

// Commit machinery
impl GameState {
    fn commit(&mut self, piece: Piece, undo: UndoRecord) -> MoveOutcome {
        let UndoRecord {
            from, to, captured, ..
        } = undo;

        if let Some(victim) = captured {
            self.captured_pieces[victim.color].push(victim.kind);
        }
        castling::retire_rights_for_move(&mut self.castling_rights, piece, from);

        let promoted = piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row();
        if promoted {
            self.board
                .set(to, Some(Piece::new(piece.color, PieceKind::Queen)));
        }

        let kind = match captured {
            Some(victim) => MoveType::Capture(victim),
            None => MoveType::Standard,
        };
        let mv = Move::new(from, to, piece, kind);
        debug!("{} plays {}", piece.color, mv);

        self.advance_turn();
        self.update_status();
        MoveOutcome {
            mv,
            promoted,
            check: self.check_status,
            status: self.status,
        }
    }

    fn attempt_castle(&mut self, color: Color, side: CastleSide) -> ChessResult<MoveOutcome> {
        if !castling::can_castle(&self.board, &self.castling_rights[color], color, side) {
            return Err(ChessError::IllegalCastling);
        }

        let row = color.home_row();
        let king_from = Square::from_row_col(row, KING_HOME_COL);
        let king_to = Square::from_row_col(row, side.king_target_col());
        let rook_from = Square::from_row_col(row, side.rook_home_col());
        let rook_to = Square::from_row_col(row, side.rook_target_col());

        self.board.make_move(king_from, king_to);
        self.board.make_move(rook_from, rook_to);
        self.king_positions[color] = king_to;
        self.castling_rights[color].retire_both();

        let mv = Move::new(
            king_from,
            king_to,
            Piece::new(color, PieceKind::King),
            MoveType::Castle(side),
        );
        debug!("{} castles {}", color, side);

        self.advance_turn();
        self.update_status();
        Ok(MoveOutcome {
            mv,
            promoted: false,
            check: self.check_status,
            status: self.status,
        })
    }

    fn advance_turn(&mut self) {
        self.turn_count += 1;
        self.current_player = self.current_player.opposite();
    }

    /// Recomputes both check flags and classifies the position for the
    /// player now to move: in check with no legal move is checkmate, out of
    /// check with no legal move is stalemate.
    fn update_status(&mut self) {
        self.check_status = ByColor::new(
            square_attacked(
                &self.board,
                self.king_positions[Color::White],
                Color::Black,
            ),
            square_attacked(
                &self.board,
                self.king_positions[Color::Black],
                Color::White,
            ),
        );

        let side = self.current_player;
        if self.check_status[side] {
            debug!("{} is in check", side);
        }
        if !self.has_any_legal_move() {
            self.status = if self.check_status[side] {
                GameStatus::Checkmate(side.opposite())
            } else {
                GameStatus::Stalemate
            };
            info!("game over: {}", self.status);
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turn: {}  Player: {}\n{}",
            self.turn_count, self.current_player, self.board
        )
    }
}

impl Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turn: {}  Player: {}  Status: {:?}\n{}",
            self.turn_count, self.current_player, self.status, self.board
        )
    }
}
