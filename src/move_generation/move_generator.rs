//! Pseudo-legal move generation dispatched on piece kind.
//!
//! The set of piece kinds is closed, so dispatch is a plain `match` onto one
//! generator function per kind rather than a trait object.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::pseudo_moves_bishop::generate_bishop_moves;
use crate::move_generation::pseudo_moves_king::generate_king_moves;
use crate::move_generation::pseudo_moves_knight::generate_knight_moves;
use crate::move_generation::pseudo_moves_pawn::generate_pawn_moves;
use crate::move_generation::pseudo_moves_queen::generate_queen_moves;
use crate::move_generation::pseudo_moves_rook::generate_rook_moves;

impl Piece {
    /// Append every pseudo-legal move of this piece standing on `from`.
    pub fn pseudo_legal_moves(self, from: Square, game_state: &GameState, out: &mut Vec<Move>) {
        let color = self.color;
        match self.kind {
            PieceKind::Pawn => generate_pawn_moves(game_state, from, color, out),
            PieceKind::Knight => generate_knight_moves(game_state, from, color, out),
            PieceKind::Bishop => generate_bishop_moves(game_state, from, color, out),
            PieceKind::Rook => generate_rook_moves(game_state, from, color, out),
            PieceKind::Queen => generate_queen_moves(game_state, from, color, out),
            PieceKind::King => generate_king_moves(game_state, from, color, out),
        }
    }
}

/// Pseudo-legal moves for every piece of the side to move, a1 to h8.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<Move> {
    let side = game_state.side_to_move;
    let mut out = Vec::with_capacity(64);
    for (from, piece) in game_state.pieces() {
        if piece.color == side {
            piece.pseudo_legal_moves(from, game_state, &mut out);
        }
    }
    out
}
