use crate::game_state::chess_rules::PROMOTION_KINDS;
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn generate_pawn_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Move>) {
    let dir = color.pawn_direction();
    let start_rank = match color {
        Color::Light => 1,
        Color::Dark => 6,
    };

    // Pushes.
    if let Some(one_step) = from.offset(0, dir) {
        if game_state.piece_at(one_step).is_none() {
            push_with_promotions(from, one_step, out);

            if from.rank == start_rank {
                if let Some(two_step) = from.offset(0, 2 * dir) {
                    if game_state.piece_at(two_step).is_none() {
                        out.push(Move::new(from, two_step));
                    }
                }
            }
        }
    }

    // Captures and en-passant.
    for file_delta in [-1i8, 1i8] {
        let Some(to) = from.offset(file_delta, dir) else {
            continue;
        };

        match game_state.piece_at(to) {
            Some(target) if target.color != color => push_with_promotions(from, to, out),
            None if game_state.en_passant_square == Some(to)
                && game_state.piece_at(Square::new(to.file, from.rank))
                    == Some(Piece::new(color.opposite(), PieceKind::Pawn)) =>
            {
                out.push(Move::en_passant(from, to));
            }
            _ => {}
        }
    }
}

fn push_with_promotions(from: Square, to: Square, out: &mut Vec<Move>) {
    if to.rank == 0 || to.rank == 7 {
        for promo in PROMOTION_KINDS {
            out.push(Move::with_promotion(from, to, promo));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::*;

    fn pawn_moves(fen: &str, from: Square, color: Color) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, from, color, &mut out);
        out
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let moves = pawn_moves(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Square::new(4, 1),
            Color::Light,
        );
        assert_eq!(
            moves,
            vec![
                Move::new(Square::new(4, 1), Square::new(4, 2)),
                Move::new(Square::new(4, 1), Square::new(4, 3)),
            ]
        );
    }

    #[test]
    fn blocked_pawn_cannot_jump_over_blocker() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Square::new(4, 1), Color::Light);
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_emits_four_choices_per_target() {
        // d7 pawn can push to d8 or capture on c8.
        let moves = pawn_moves("2r3k1/3P4/8/8/8/8/8/4K3 w - - 0 1", Square::new(3, 6), Color::Light);
        assert_eq!(moves.len(), 8);
        let kinds: Vec<Option<PieceKind>> = moves.iter().take(4).map(|m| m.promotion).collect();
        assert_eq!(
            kinds,
            vec![
                Some(PieceKind::Queen),
                Some(PieceKind::Rook),
                Some(PieceKind::Bishop),
                Some(PieceKind::Knight),
            ]
        );
    }

    #[test]
    fn dark_pawn_captures_en_passant_onto_target() {
        let moves = pawn_moves("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1", Square::new(4, 3), Color::Dark);
        assert!(moves.contains(&Move::en_passant(Square::new(4, 3), Square::new(3, 2))));
        assert!(moves.contains(&Move::new(Square::new(4, 3), Square::new(4, 2))));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn en_passant_requires_an_enemy_pawn_beside_the_origin() {
        // Target set on the board directly, bypassing FEN validation.
        let mut game =
            GameState::from_fen("4k3/8/8/3PP3/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        game.en_passant_square = Some(Square::new(4, 5));
        let mut out = Vec::new();
        generate_pawn_moves(&game, Square::new(3, 4), Color::Light, &mut out);
        assert!(!out.iter().any(|m| m.en_passant));

        // Own king beside the pawn: the target must not turn into a king capture.
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/3PK3/8 w - - 0 1").expect("FEN should parse");
        game.en_passant_square = Some(Square::new(4, 2));
        assert!(!game.legal_moves().iter().any(|m| m.en_passant));
        assert!(game.pieces().any(|(_, p)| p == Piece::new(Color::Light, PieceKind::King)));
    }
}
