//! Attack oracle: is a square attacked, and is a king in check.
//!
//! Attacks are found by looking outward from the target square, one piece
//! kind at a time, so the cost does not depend on how many enemy pieces are
//! on the board.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{
    DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    game_state
        .pieces()
        .find(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
        .map(|(sq, _)| sq)
}

/// A side without a king is never in check.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color)
}

/// True if any piece of the opponent of `defending_color` could capture on
/// `square`, regardless of whose turn it is.
pub fn is_square_attacked(game_state: &GameState, square: Square, defending_color: Color) -> bool {
    let enemy = defending_color.opposite();
    let holds = |sq: Option<Square>, kind: PieceKind| {
        sq.and_then(|s| game_state.piece_at(s)) == Some(Piece::new(enemy, kind))
    };

    // Enemy pawns sit one rank ahead of the square from the defender's side.
    let pawn_rank = defending_color.pawn_direction();
    if holds(square.offset(-1, pawn_rank), PieceKind::Pawn)
        || holds(square.offset(1, pawn_rank), PieceKind::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(square.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }

    if ray_hits(game_state, square, enemy, &DIAGONAL_DIRECTIONS, PieceKind::Bishop) {
        return true;
    }

    if ray_hits(game_state, square, enemy, &ORTHOGONAL_DIRECTIONS, PieceKind::Rook) {
        return true;
    }

    KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(square.offset(df, dr), PieceKind::King))
}

/// First piece along each ray decides: an enemy `slider` or queen attacks.
fn ray_hits(
    game_state: &GameState,
    square: Square,
    enemy: Color,
    directions: &[(i8, i8)],
    slider: PieceKind,
) -> bool {
    for &(d_file, d_rank) in directions {
        let mut cursor = square.offset(d_file, d_rank);
        while let Some(sq) = cursor {
            if let Some(piece) = game_state.piece_at(sq) {
                if piece.color == enemy && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cursor = sq.offset(d_file, d_rank);
        }
    }
    false
}
