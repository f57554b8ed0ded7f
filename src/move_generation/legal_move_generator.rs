//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves piece by piece, then plays each one on the
//! shared board, keeps it only if the mover's king is safe, and takes it
//! back. Nothing is cloned: the undo stack restores the board every time.

use crate::game_state::game_state::GameState;
use crate::game_state::chess_types::Move;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::generate_pseudo_legal_moves;

/// Legal moves for the side to move, in generation order.
pub fn generate_legal_moves(game_state: &mut GameState) -> Vec<Move> {
    let mover = game_state.side_to_move;
    let pseudo = generate_pseudo_legal_moves(game_state);

    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        // Generated moves always start on an occupied square.
        if apply_move(game_state, mv).is_err() {
            continue;
        }
        let safe = !is_king_in_check(game_state, mover);
        undo_move(game_state);

        if safe {
            legal.push(mv);
        }
    }

    legal
}
