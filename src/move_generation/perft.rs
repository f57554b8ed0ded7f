//! Perft: exhaustive legal-move tree counts used to validate generation.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;

/// Leaf counts by category. Categories describe the move that reached the leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count the leaves `depth` plies below `game_state`.
///
/// The state is explored in place and restored before returning.
pub fn perft(game_state: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        total.merge(perft_recurse(game_state, mv, depth - 1)?);
    }
    Ok(total)
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in generate_legal_moves(game_state) {
        let counts = perft_recurse(game_state, mv, depth - 1)?;
        out.push((mv, counts.nodes));
    }
    Ok(out)
}

fn perft_recurse(game_state: &mut GameState, mv: Move, remaining: u8) -> ChessResult<PerftCounts> {
    let is_capture = mv.en_passant || (mv.castle.is_none() && game_state.piece_at(mv.to).is_some());
    apply_move(game_state, mv)?;

    let result = if remaining == 0 {
        let mut leaf = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
        leaf.captures += u64::from(is_capture);
        leaf.en_passant += u64::from(mv.en_passant);
        leaf.castles += u64::from(mv.castle.is_some());
        leaf.promotions += u64::from(mv.promotion.is_some());
        if is_king_in_check(game_state, game_state.side_to_move) {
            leaf.checks += 1;
            if generate_legal_moves(game_state).is_empty() {
                leaf.checkmates += 1;
            }
        }
        Ok(leaf)
    } else {
        perft(game_state, remaining)
    };

    undo_move(game_state);
    result
}
