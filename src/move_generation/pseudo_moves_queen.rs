use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::pseudo_moves_bishop::generate_bishop_moves;
use crate::move_generation::pseudo_moves_rook::generate_rook_moves;

/// Queen moves are the union of rook and bishop rays.
pub fn generate_queen_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Move>) {
    generate_rook_moves(game_state, from, color, out);
    generate_bishop_moves(game_state, from, color, out);
}
