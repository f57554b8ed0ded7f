use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_step_moves, KNIGHT_OFFSETS};

pub fn generate_knight_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Move>) {
    push_step_moves(game_state, from, color, &KNIGHT_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn knight_in_center_has_eight_targets() {
        let game = GameState::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_knight_moves(&game, Square::new(3, 3), Color::Light, &mut out);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn knight_in_corner_skips_friendly_squares() {
        let game = GameState::new_game();
        let mut out = Vec::new();
        generate_knight_moves(&game, Square::new(1, 0), Color::Light, &mut out);
        // b1 reaches a3 and c3; d2 holds a pawn.
        assert_eq!(out.len(), 2);
    }
}
