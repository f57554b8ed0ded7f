use crate::game_state::chess_types::*;

/// Single undo record for `apply_move` / `undo_move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    /// Includes the en-passant victim, which does not sit on `mv.to`.
    pub captured_piece: Option<Piece>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}
