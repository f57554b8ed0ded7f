//! In-place move executor and its exact inverse.
//!
//! `apply_move` mutates a `GameState` and pushes an [`UndoState`] holding
//! everything needed to reverse the mutation. `undo_move` pops that record
//! and restores the previous position bit for bit.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

/// Apply `mv` without checking legality.
///
/// Fails only when the origin square is empty, in which case nothing is
/// modified.
pub fn apply_move(game_state: &mut GameState, mv: Move) -> ChessResult<()> {
    let moved_piece = game_state
        .piece_at(mv.from)
        .ok_or_else(|| ChessError::NoPieceOnSquare(square_to_algebraic(mv.from)))?;
    let mover = moved_piece.color;
    let captured_piece = if mv.castle.is_some() {
        None
    } else {
        game_state.piece_at(mv.capture_square())
    };

    game_state.undo_stack.push(UndoState {
        mv,
        moved_piece,
        captured_piece,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
    });

    // Update en-passant square.
    game_state.en_passant_square = None;
    if moved_piece.kind == PieceKind::Pawn && mv.from.rank.abs_diff(mv.to.rank) == 2 {
        game_state.en_passant_square = Some(Square::new(mv.from.file, (mv.from.rank + mv.to.rank) / 2));
    }

    // Board update.
    if let Some(side) = mv.castle {
        let rank = mv.from.rank;
        let rook_from = Square::new(side.rook_from_file(), rank);
        let rook_to = Square::new(side.rook_to_file(), rank);
        let rook = game_state.piece_at(rook_from);
        game_state.set_piece(mv.from, None);
        game_state.set_piece(rook_from, None);
        game_state.set_piece(mv.to, Some(moved_piece));
        game_state.set_piece(rook_to, rook);
    } else {
        let landed = mv
            .promotion
            .map_or(moved_piece, |kind| Piece::new(mover, kind));
        if mv.en_passant {
            game_state.set_piece(mv.capture_square(), None);
        }
        game_state.set_piece(mv.from, None);
        game_state.set_piece(mv.to, Some(landed));
    }

    update_castling_rights(game_state, moved_piece, mv, captured_piece);

    // Update clocks.
    if moved_piece.kind == PieceKind::Pawn || captured_piece.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = game_state.side_to_move.opposite();

    Ok(())
}

/// Reverse the most recent `apply_move`. Returns `None` on an empty history.
pub fn undo_move(game_state: &mut GameState) -> Option<UndoState> {
    let undo = game_state.undo_stack.pop()?;
    let mv = undo.mv;

    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;

    if let Some(side) = mv.castle {
        let rank = mv.from.rank;
        let rook_from = Square::new(side.rook_from_file(), rank);
        let rook_to = Square::new(side.rook_to_file(), rank);
        let rook = game_state.piece_at(rook_to);
        game_state.set_piece(mv.to, None);
        game_state.set_piece(rook_to, None);
        game_state.set_piece(mv.from, Some(undo.moved_piece));
        game_state.set_piece(rook_from, rook);
    } else if mv.en_passant {
        game_state.set_piece(mv.to, None);
        game_state.set_piece(mv.capture_square(), undo.captured_piece);
        game_state.set_piece(mv.from, Some(undo.moved_piece));
    } else {
        game_state.set_piece(mv.to, undo.captured_piece);
        game_state.set_piece(mv.from, Some(undo.moved_piece));
    }

    game_state.side_to_move = game_state.side_to_move.opposite();

    Some(undo)
}

/// King moves drop both of the mover's rights. Rook rights are tied to the
/// exact home corner: a rook leaving, or captured on, any other square keeps
/// every right, even on the home rank or file.
fn update_castling_rights(
    game_state: &mut GameState,
    moved_piece: Piece,
    mv: Move,
    captured_piece: Option<Piece>,
) {
    if moved_piece.kind == PieceKind::King {
        game_state
            .castling_rights
            .remove(CastlingRights::for_color(moved_piece.color));
    }

    if moved_piece.kind == PieceKind::Rook {
        if let Some(right) = CastlingRights::for_rook_home(mv.from) {
            if CastlingRights::for_color(moved_piece.color).contains(right) {
                game_state.castling_rights.remove(right);
            }
        }
    }

    // Capturing a rook on its home corner removes the opponent's right.
    if let Some(captured) = captured_piece.filter(|p| p.kind == PieceKind::Rook) {
        if let Some(right) = CastlingRights::for_rook_home(mv.to) {
            if CastlingRights::for_color(captured.color).contains(right) {
                game_state.castling_rights.remove(right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{apply_move, undo_move};
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn double_step_sets_target_and_en_passant_removes_victim() {
        let mut game = GameState::from_fen("4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1").expect("FEN should parse");

        apply_move(&mut game, Move::new(sq("d2"), sq("d4"))).expect("d2d4 applies");
        assert_eq!(game.en_passant_square, Some(sq("d3")));

        let ep = Move::en_passant(sq("e4"), sq("d3"));
        assert!(game.legal_moves().contains(&ep));
        apply_move(&mut game, ep).expect("exd3 applies");

        assert_eq!(game.piece_at(sq("d4")), None);
        assert_eq!(game.piece_at(sq("e4")), None);
        assert_eq!(game.piece_at(sq("d3")), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(
            game.undo_stack.last().and_then(|u| u.captured_piece),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );

        undo_move(&mut game);
        assert_eq!(game.piece_at(sq("d4")), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        assert_eq!(game.piece_at(sq("e4")), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        assert_eq!(game.piece_at(sq("d3")), None);
        assert_eq!(game.en_passant_square, Some(sq("d3")));
    }

    #[test]
    fn castling_moves_rook_and_clears_both_rights() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        let before = game.clone();

        apply_move(&mut game, Move::castling(sq("e1"), sq("g1"), CastleSide::Kingside))
            .expect("O-O applies");
        assert_eq!(game.piece_at(sq("g1")), Some(Piece::new(Color::Light, PieceKind::King)));
        assert_eq!(game.piece_at(sq("f1")), Some(Piece::new(Color::Light, PieceKind::Rook)));
        assert_eq!(game.piece_at(sq("h1")), None);
        assert_eq!(game.piece_at(sq("e1")), None);
        assert_eq!(game.castling_rights, CastlingRights::for_color(Color::Dark));
        assert_eq!(game.halfmove_clock, 4);

        undo_move(&mut game);
        assert_eq!(game, before);

        apply_move(&mut game, Move::castling(sq("e1"), sq("c1"), CastleSide::Queenside))
            .expect("O-O-O applies");
        assert_eq!(game.piece_at(sq("c1")), Some(Piece::new(Color::Light, PieceKind::King)));
        assert_eq!(game.piece_at(sq("d1")), Some(Piece::new(Color::Light, PieceKind::Rook)));
        assert_eq!(game.piece_at(sq("a1")), None);
        undo_move(&mut game);
        assert_eq!(game, before);
    }

    #[test]
    fn rook_moves_and_captures_clear_specific_rights() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");

        // Ra1xa8 drops white's queenside right and black's queenside right.
        apply_move(&mut game, Move::new(sq("a1"), sq("a8"))).expect("Rxa8 applies");
        let mut expected = CastlingRights::ALL;
        expected.remove(CastlingRights::LIGHT_QUEENSIDE);
        expected.remove(CastlingRights::DARK_QUEENSIDE);
        assert_eq!(game.castling_rights, expected);
        assert_eq!(game.halfmove_clock, 0);

        // A quiet rook move from h8 drops only black's kingside right.
        apply_move(&mut game, Move::new(sq("h8"), sq("h5"))).expect("Rh5 applies");
        expected.remove(CastlingRights::DARK_KINGSIDE);
        assert_eq!(game.castling_rights, expected);
        assert_eq!(game.fullmove_number, 2);
    }

    #[test]
    fn rooks_off_their_home_corner_leave_rights_alone() {
        let mut game = GameState::from_fen("r3k2r/8/8/r7/8/R7/8/4K2R w Kkq - 0 1")
            .expect("FEN should parse");
        let mut expected = CastlingRights::ALL;
        expected.remove(CastlingRights::LIGHT_QUEENSIDE);
        assert_eq!(game.castling_rights, expected);

        // Rook leaves a3 and captures a rook on a5, both on the queenside file.
        apply_move(&mut game, Move::new(sq("a3"), sq("a5"))).expect("Rxa5 applies");
        assert_eq!(game.castling_rights, expected);

        apply_move(&mut game, Move::new(sq("e8"), sq("d8"))).expect("Kd8 applies");
        expected.remove(CastlingRights::DARK_KINGSIDE);
        expected.remove(CastlingRights::DARK_QUEENSIDE);
        assert_eq!(game.castling_rights, expected);

        apply_move(&mut game, Move::new(sq("a5"), sq("a6"))).expect("Ra6 applies");
        assert_eq!(game.castling_rights, expected);
    }

    #[test]
    fn promotion_replaces_pawn_and_undo_restores_it() {
        let mut game = GameState::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 5 40").expect("FEN should parse");
        let before = game.clone();

        apply_move(&mut game, Move::with_promotion(sq("a7"), sq("b8"), PieceKind::Knight))
            .expect("axb8=N applies");
        assert_eq!(game.piece_at(sq("b8")), Some(Piece::new(Color::Light, PieceKind::Knight)));
        assert_eq!(game.piece_at(sq("a7")), None);
        assert_eq!(game.halfmove_clock, 0);

        undo_move(&mut game);
        assert_eq!(game, before);
        assert_eq!(game.piece_at(sq("b8")), Some(Piece::new(Color::Dark, PieceKind::Rook)));
    }

    #[test]
    fn empty_origin_is_rejected_without_mutation() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert!(apply_move(&mut game, Move::new(sq("e4"), sq("e5"))).is_err());
        assert_eq!(game, before);
        assert!(game.undo_stack.is_empty());
    }

    #[test]
    fn make_then_undo_restores_every_field_along_random_games() {
        let mut rng = StdRng::seed_from_u64(0xdec0_ded);

        for _ in 0..10 {
            let mut game = GameState::new_game();
            for _ in 0..80 {
                let moves = game.legal_moves();
                if moves.is_empty() {
                    break;
                }

                for &mv in &moves {
                    let before = game.clone();
                    apply_move(&mut game, mv).expect("legal move applies");
                    assert!(
                        !game.is_in_check(before.side_to_move),
                        "legal move left own king attacked"
                    );
                    undo_move(&mut game);
                    assert_eq!(game, before, "undo mismatch after {mv:?}");
                    assert_eq!(game.undo_stack, before.undo_stack);
                }

                let mv = moves[rng.random_range(0..moves.len())];
                apply_move(&mut game, mv).expect("legal move applies");
            }
        }
    }
}
