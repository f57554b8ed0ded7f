//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard starting position, promotion choices,
//! material values and the fifty-move limit.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Promotion choices in the order the generator emits them.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Plies without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// File the king starts on for both colors.
pub const KING_HOME_FILE: u8 = 4;

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}
