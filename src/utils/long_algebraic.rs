use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Coordinate notation for `mv`: `e2e4`, `e1g1`, `e7e8q`.
pub fn move_to_long_algebraic(mv: Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from));
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(kind) = mv.promotion {
        out.push(kind.to_char());
    }
    out
}

/// Resolve coordinate notation against the legal moves of `game_state`.
///
/// The text only names squares and a promotion letter; castling and
/// en-passant flags come from the matching legal move.
pub fn parse_long_algebraic(game_state: &mut GameState, text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidMoveNotation(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(
            char_to_promotion(ch).ok_or_else(|| ChessError::InvalidMoveNotation(text.to_owned()))?,
        ),
        None => None,
    };

    game_state
        .legal_moves()
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
        .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
