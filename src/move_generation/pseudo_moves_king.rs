use crate::game_state::chess_rules::KING_HOME_FILE;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{push_step_moves, KING_OFFSETS};

pub fn generate_king_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Move>) {
    push_step_moves(game_state, from, color, &KING_OFFSETS, out);
    generate_castling_moves(game_state, from, color, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, color: Color, out: &mut Vec<Move>) {
    let home_rank = color.home_rank();
    if king_from != Square::new(KING_HOME_FILE, home_rank) {
        return;
    }

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !game_state
            .castling_rights
            .contains(CastlingRights::for_side(color, side))
        {
            continue;
        }

        let rook_from = Square::new(side.rook_from_file(), home_rank);
        if game_state.piece_at(rook_from) != Some(Piece::new(color, PieceKind::Rook)) {
            continue;
        }

        let (low, high) = if side.rook_from_file() > KING_HOME_FILE {
            (KING_HOME_FILE + 1, side.rook_from_file())
        } else {
            (side.rook_from_file() + 1, KING_HOME_FILE)
        };
        let path_clear = (low..high).all(|file| game_state.piece_at(Square::new(file, home_rank)).is_none());
        if !path_clear {
            continue;
        }

        // Origin, transit and destination must all be safe.
        let king_to = Square::new(side.king_to_file(), home_rank);
        let transit = Square::new(side.rook_to_file(), home_rank);
        if [king_from, transit, king_to]
            .iter()
            .any(|&sq| is_square_attacked(game_state, sq, color))
        {
            continue;
        }

        out.push(Move::castling(king_from, king_to, side));
    }
}
