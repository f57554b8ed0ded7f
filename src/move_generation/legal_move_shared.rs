//! Geometry shared by the per-piece generators and the attack oracle.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Walk each direction from `from` until the edge or a piece.
///
/// An enemy blocker is included as a capture, a friendly one is not.
pub fn push_sliding_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(d_file, d_rank) in directions {
        let mut cursor = from.offset(d_file, d_rank);
        while let Some(to) = cursor {
            match game_state.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(blocker) => {
                    if blocker.color != color {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            cursor = to.offset(d_file, d_rank);
        }
    }
}

/// Single-step moves to each in-bounds offset not held by a friendly piece.
pub fn push_step_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(d_file, d_rank) in offsets {
        let Some(to) = from.offset(d_file, d_rank) else {
            continue;
        };
        if game_state.piece_at(to).map_or(true, |p| p.color != color) {
            out.push(Move::new(from, to));
        }
    }
}
