//! MVV/LVA move ordering for alpha-beta search.

use std::cmp::Reverse;

use crate::game_state::chess_rules::piece_value;
use crate::game_state::{chess_types::*, game_state::GameState};

/// Ordering key: `victim * 100 - attacker` for captures, 0 for quiet moves.
pub fn mvv_lva_score(game_state: &GameState, mv: Move) -> i32 {
    let victim = if mv.en_passant {
        Some(PieceKind::Pawn)
    } else if mv.castle.is_some() {
        None
    } else {
        game_state.piece_at(mv.to).map(|piece| piece.kind)
    };

    match (victim, game_state.piece_at(mv.from)) {
        (Some(victim), Some(attacker)) => piece_value(victim) * 100 - piece_value(attacker.kind),
        _ => 0,
    }
}

/// Stable sort, highest score first. Quiet moves keep generation order.
pub fn order_moves(game_state: &GameState, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| Reverse(mvv_lva_score(game_state, mv)));
}
