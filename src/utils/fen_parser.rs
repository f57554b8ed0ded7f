//! FEN-to-GameState parser.
//!
//! Builds a fully-populated state from a Forsyth-Edwards Notation string.
//! Every field is validated; the first malformed field aborts the parse with
//! a [`FenError`] and no partially built board escapes.

use crate::chess_errors::FenError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let &[board_part, side_part, castling_part, en_passant_part, halfmove_part, fullmove_part] =
        parts.as_slice()
    else {
        return Err(FenError::FieldCount(parts.len()));
    };

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, &game_state)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| FenError::HalfmoveClock(halfmove_part.to_owned()))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| FenError::FullmoveNumber(fullmove_part.to_owned()))?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut kings_seen = [false; 2];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let rank_label = board_rank + 1;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidEmptyRun(ch));
                }
                file += empty_count as usize;
                if file > 8 {
                    return Err(FenError::RankLength {
                        rank: rank_label,
                        files: file,
                    });
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;

            if file >= 8 {
                return Err(FenError::RankLength {
                    rank: rank_label,
                    files: file + 1,
                });
            }

            if piece.kind == PieceKind::King {
                let seen = &mut kings_seen[piece.color.index()];
                if *seen {
                    return Err(FenError::DuplicateKing(piece.color));
                }
                *seen = true;
            }

            game_state.set_piece(Square::new(file as u8, board_rank), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankLength {
                rank: rank_label,
                files: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;

    for ch in castling_part.chars() {
        let right = match ch {
            'K' => CastlingRights::LIGHT_KINGSIDE,
            'Q' => CastlingRights::LIGHT_QUEENSIDE,
            'k' => CastlingRights::DARK_KINGSIDE,
            'q' => CastlingRights::DARK_QUEENSIDE,
            _ => return Err(FenError::CastlingRights(castling_part.to_owned())),
        };
        if rights.contains(right) {
            return Err(FenError::CastlingRights(castling_part.to_owned()));
        }
        rights.insert(right);
    }

    Ok(rights)
}

fn parse_en_passant_square(
    en_passant_part: &str,
    game_state: &GameState,
) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let invalid = || FenError::EnPassant(en_passant_part.to_owned());
    let square = algebraic_to_square(en_passant_part).map_err(|_| invalid())?;

    // The target is the square the opponent's pawn just passed over: empty,
    // on the sixth rank from the mover's side, with that pawn right behind it.
    let mover = game_state.side_to_move;
    let (target_rank, victim_rank) = match mover {
        Color::Light => (5, 4),
        Color::Dark => (2, 3),
    };
    if square.rank != target_rank || game_state.piece_at(square).is_some() {
        return Err(invalid());
    }
    let victim = game_state.piece_at(Square::new(square.file, victim_rank));
    if victim != Some(Piece::new(mover.opposite(), PieceKind::Pawn)) {
        return Err(invalid());
    }

    Ok(Some(square))
}
