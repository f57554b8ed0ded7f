//! Mailbox game state with an in-place make/undo history.
//!
//! `GameState` is the central model of the crate. It stores the 8x8 grid,
//! turn and rights flags, clocks, and the undo stack consumed by
//! `undo_move`. Search and legality checks mutate one `GameState` in place
//! and rely on the undo stack to restore it exactly.

use tracing::warn;

use crate::chess_errors::{ChessError, ChessResult, FenError};
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Game state optimized for in-place move making/unmaking.
#[derive(Debug, Clone)]
pub struct GameState {
    // [rank][file], rank 0 is the first rank.
    pub board: [[Option<Piece>; 8]; 8],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Make/unmake stack ---
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [[None; 8]; 8],

            side_to_move: Color::Light,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            undo_stack: Vec::new(),
        }
    }
}

/// Two states are equal when their positions are; history is not compared.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for GameState {}

impl GameState {
    /// Empty board, light to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    /// Replace this state with the position described by `fen`.
    ///
    /// On error the current state, history included, is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        match parse_fen(fen) {
            Ok(parsed) => {
                *self = parsed;
                Ok(())
            }
            Err(err) => {
                warn!(%fen, error = %err, "rejected FEN load");
                Err(err)
            }
        }
    }

    /// Back to the standard starting position with empty history.
    pub fn reset(&mut self) {
        *self = Self::new_game();
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.rank as usize][square.file as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.rank as usize][square.file as usize] = piece;
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Legal moves for the side to move, regenerated on every call.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        generate_legal_moves(self)
    }

    /// Apply `mv` if it is legal for the side to move.
    ///
    /// Illegal requests are rejected without mutating the state.
    pub fn make_move(&mut self, mv: Move) -> ChessResult<()> {
        if !self.legal_moves().contains(&mv) {
            let lan = move_to_long_algebraic(mv);
            warn!(mv = %lan, fen = %self.get_fen(), "illegal move request");
            return Err(ChessError::IllegalMove(lan));
        }
        apply_move(self, mv)
    }

    /// Reverse the most recent move. A no-op on an empty history.
    pub fn undo_move(&mut self) -> Option<UndoState> {
        undo_move(self)
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(self, color)
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.legal_moves().is_empty() && self.is_check()
    }

    pub fn is_stalemate(&mut self) -> bool {
        self.legal_moves().is_empty() && !self.is_check()
    }

    /// K v K, K+minor v K, or K+B v K+B with bishops on same-colored squares.
    ///
    /// Other dead positions, two knights against a bare king among them, are
    /// not recognized.
    pub fn has_insufficient_material(&self) -> bool {
        let others: Vec<(Square, Piece)> = self
            .pieces()
            .filter(|(_, piece)| piece.kind != PieceKind::King)
            .collect();

        match others.as_slice() {
            [] => true,
            [(_, piece)] => matches!(piece.kind, PieceKind::Bishop | PieceKind::Knight),
            [(sq_a, a), (sq_b, b)] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && a.color != b.color
                    && sq_a.is_dark() == sq_b.is_dark()
            }
            _ => false,
        }
    }

    /// Draw by the fifty-move rule, insufficient material, or stalemate.
    pub fn is_draw(&mut self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
            || self.has_insufficient_material()
            || self.is_stalemate()
    }
}
