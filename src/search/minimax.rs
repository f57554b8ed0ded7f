//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The search plays moves on the caller's `GameState` and takes them back
//! through the undo stack, so the position is unchanged on return. Scores are
//! always from the engine color's point of view: a node maximizes when the
//! engine's color is to move there and minimizes otherwise.

use tracing::{debug, trace};

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::order_moves;
use crate::utils::long_algebraic::move_to_long_algebraic;

const SCORE_INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the root itself is terminal or `depth` is 0.
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

pub fn minimax_search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    engine_color: Color,
    depth: u8,
) -> ChessResult<SearchResult> {
    let maximizing = game_state.side_to_move == engine_color;
    let mut nodes = 0u64;
    let (score, best_move) = search_root(
        game_state,
        scorer,
        engine_color,
        depth,
        maximizing,
        &mut nodes,
    )?;

    debug!(
        depth,
        score,
        nodes,
        best_move = %best_move.map_or_else(|| "none".to_owned(), move_to_long_algebraic),
        "search complete"
    );

    Ok(SearchResult {
        best_move,
        score,
        nodes,
    })
}

fn search_root<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    engine_color: Color,
    depth: u8,
    maximizing: bool,
    nodes: &mut u64,
) -> ChessResult<(i32, Option<Move>)> {
    *nodes += 1;
    let Some(mut moves) = expandable_moves(game_state, depth) else {
        return Ok((scorer.score(game_state, engine_color), None));
    };
    order_moves(game_state, &mut moves);

    let mut alpha = -SCORE_INFINITY;
    let mut beta = SCORE_INFINITY;
    let mut best_score = if maximizing { -SCORE_INFINITY } else { SCORE_INFINITY };
    let mut best_move = None;

    for mv in moves {
        let score = score_child(game_state, scorer, engine_color, depth, alpha, beta, mv, nodes)?;
        trace!(mv = %move_to_long_algebraic(mv), score, "root move");

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(best_score);
        }
        if beta <= alpha {
            break;
        }
    }

    Ok((best_score, best_move))
}

#[allow(clippy::too_many_arguments)]
fn minimax<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    engine_color: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> ChessResult<i32> {
    *nodes += 1;
    let Some(mut moves) = expandable_moves(game_state, depth) else {
        return Ok(scorer.score(game_state, engine_color));
    };
    order_moves(game_state, &mut moves);

    let mut best_score = if maximizing { -SCORE_INFINITY } else { SCORE_INFINITY };

    for mv in moves {
        let score = score_child(game_state, scorer, engine_color, depth, alpha, beta, mv, nodes)?;

        if maximizing {
            best_score = best_score.max(score);
            alpha = alpha.max(best_score);
        } else {
            best_score = best_score.min(score);
            beta = beta.min(best_score);
        }
        if beta <= alpha {
            break;
        }
    }

    Ok(best_score)
}

/// Play `mv`, search the child one ply shallower, and take `mv` back.
#[allow(clippy::too_many_arguments)]
fn score_child<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    engine_color: Color,
    depth: u8,
    alpha: i32,
    beta: i32,
    mv: Move,
    nodes: &mut u64,
) -> ChessResult<i32> {
    apply_move(game_state, mv)?;
    let child_maximizes = game_state.side_to_move == engine_color;
    let score = minimax(
        game_state,
        scorer,
        engine_color,
        depth - 1,
        alpha,
        beta,
        child_maximizes,
        nodes,
    );
    undo_move(game_state);
    score
}

/// Legal moves to expand, or `None` for a terminal node: depth exhausted,
/// no legal moves (mate or stalemate), fifty-move rule or dead material.
fn expandable_moves(game_state: &mut GameState, depth: u8) -> Option<Vec<Move>> {
    if depth == 0 {
        return None;
    }
    if game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES || game_state.has_insufficient_material() {
        return None;
    }
    let moves = generate_legal_moves(game_state);
    if moves.is_empty() {
        return None;
    }
    Some(moves)
}

#[cfg(test)]
mod tests {
    use super::minimax_search;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_apply::{apply_move, undo_move};
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    /// Full-width minimax without pruning, for comparison.
    fn plain_minimax(game: &mut GameState, engine_color: Color, depth: u8) -> i32 {
        let moves = generate_legal_moves(game);
        if depth == 0 || moves.is_empty() {
            return PieceSquareScorer.score(game, engine_color);
        }
        let scores = moves.into_iter().map(|mv| {
            apply_move(game, mv).expect("legal move applies");
            let score = plain_minimax(game, engine_color, depth - 1);
            undo_move(game);
            score
        });
        let scores: Vec<i32> = scores.collect();
        if game.side_to_move == engine_color {
            scores.into_iter().max().unwrap_or_default()
        } else {
            scores.into_iter().min().unwrap_or_default()
        }
    }

    #[test]
    fn depth_one_score_matches_evaluation_of_chosen_child() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let result = minimax_search(&mut game, &PieceSquareScorer, Color::Light, 1)
            .expect("search should run");

        assert_eq!(game, before);
        assert!(game.undo_stack.is_empty());

        let best = result.best_move.expect("start position has moves");
        assert!(game.legal_moves().contains(&best));

        let mut child = game.clone();
        child.make_move(best).expect("best move is legal");
        assert_eq!(result.score, PieceSquareScorer.score(&mut child, Color::Light));
        assert_eq!(result.nodes, 21);
    }

    #[test]
    fn depth_zero_evaluates_without_a_move() {
        let mut game = GameState::new_game();
        let result = minimax_search(&mut game, &PieceSquareScorer, Color::Dark, 0)
            .expect("search should run");
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn engine_takes_the_hanging_queen() {
        let mut game =
            GameState::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let result = minimax_search(&mut game, &PieceSquareScorer, Color::Light, 2)
            .expect("search should run");
        assert_eq!(result.best_move, Some(Move::new(sq("e4"), sq("d5"))));
    }

    #[test]
    fn root_minimizes_when_the_opponent_is_to_move() {
        // Engine plays Light but Dark is to move: the expected reply is the queen capture.
        let mut game =
            GameState::from_fen("4k3/8/8/3p4/4Q3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let result = minimax_search(&mut game, &PieceSquareScorer, Color::Light, 1)
            .expect("search should run");
        assert_eq!(result.best_move, Some(Move::new(sq("d5"), sq("e4"))));
        assert!(result.score < 0);
    }

    #[test]
    fn pruning_does_not_change_the_root_score() {
        let fen = "r3k2r/pp3ppp/8/3q4/4P3/2N5/PP3PPP/R3K2R w KQkq - 0 1";
        for (color, depth) in [(Color::Light, 1), (Color::Light, 2), (Color::Dark, 2)] {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let expected = plain_minimax(&mut game, color, depth);
            let result = minimax_search(&mut game, &PieceSquareScorer, color, depth)
                .expect("search should run");
            assert_eq!(result.score, expected, "{color:?} at depth {depth}");
        }
    }

    #[test]
    fn drawn_roots_return_the_static_score_without_a_move() {
        let cases = [
            // Fifty-move rule reached, both sides still have rooks.
            ("r3k3/8/8/8/8/8/8/R3K3 w - - 100 80", Color::Light, 2),
            // King and knight against king.
            ("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1", Color::Light, 3),
            ("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1", Color::Dark, 1),
        ];
        for (fen, color, depth) in cases {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let expected = PieceSquareScorer.score(&mut game.clone(), color);
            let result = minimax_search(&mut game, &PieceSquareScorer, color, depth)
                .expect("search should run");
            assert_eq!(result.best_move, None, "{fen} at depth {depth}");
            assert_eq!(result.nodes, 1, "{fen} at depth {depth}");
            assert_eq!(result.score, expected, "{fen} at depth {depth}");
        }
    }
}
