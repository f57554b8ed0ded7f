//! Pluggable board evaluation interfaces and the default scorer.
//!
//! Search delegates static position scoring to [`BoardScorer`], so alternate
//! heuristics can be swapped without touching the search code.

use crate::game_state::chess_rules::piece_value;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub const MOBILITY_WEIGHT: i32 = 10;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `perspective`, higher is better for it.
    ///
    /// The state may be mutated during scoring but must be restored.
    fn score(&self, game_state: &mut GameState, perspective: Color) -> i32;
}

/// Tables are written from the owner's side: row 0 is the owner's back rank,
/// column 0 is the a-file.
type PieceSquareTable = [[i32; 8]; 8];

#[rustfmt::skip]
const PAWN_TABLE: PieceSquareTable = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: PieceSquareTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_TABLE: PieceSquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_TABLE: PieceSquareTable = [
    [  0,   0,   0,   5,   5,   0,   0,   0],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN_TABLE: PieceSquareTable = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_TABLE: PieceSquareTable = [
    [ 20,  30,  10,   0,   0,  10,  30,  20],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
];

const fn table_for(kind: PieceKind) -> &'static PieceSquareTable {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

/// Placement bonus of `piece` on `square`, seen by `perspective`.
///
/// Opposing pieces read the table mirrored in both axes.
pub fn piece_square_value(piece: Piece, square: Square, perspective: Color) -> i32 {
    let row = match piece.color {
        Color::Light => square.rank,
        Color::Dark => 7 - square.rank,
    };
    let col = if piece.color == perspective {
        square.file
    } else {
        7 - square.file
    };
    table_for(piece.kind)[row as usize][col as usize]
}

/// Material plus piece-square tables plus legal-move mobility.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    pub fn material_and_placement(game_state: &GameState, perspective: Color) -> i32 {
        game_state
            .pieces()
            .map(|(square, piece)| {
                let value = piece_value(piece.kind) + piece_square_value(piece, square, perspective);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    /// `MOBILITY_WEIGHT * (own legal moves - opponent legal moves)`.
    pub fn mobility(game_state: &mut GameState, perspective: Color) -> i32 {
        let own = legal_move_count_for(game_state, perspective);
        let other = legal_move_count_for(game_state, perspective.opposite());
        MOBILITY_WEIGHT * (own as i32 - other as i32)
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &mut GameState, perspective: Color) -> i32 {
        Self::material_and_placement(game_state, perspective) + Self::mobility(game_state, perspective)
    }
}

/// Legal move count for `color` as if it were to move.
///
/// The en-passant target only belongs to the real side to move, so it is
/// hidden while counting the other side. Both fields are restored.
fn legal_move_count_for(game_state: &mut GameState, color: Color) -> usize {
    let saved_side = game_state.side_to_move;
    let saved_en_passant = game_state.en_passant_square;

    if color != saved_side {
        game_state.en_passant_square = None;
    }
    game_state.side_to_move = color;
    let count = generate_legal_moves(game_state).len();

    game_state.side_to_move = saved_side;
    game_state.en_passant_square = saved_en_passant;
    count
}

#[cfg(test)]
mod tests {
    use super::{piece_square_value, BoardScorer, PieceSquareScorer};
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn start_position_is_balanced_for_both_sides() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert_eq!(PieceSquareScorer.score(&mut game, Color::Light), 0);
        assert_eq!(PieceSquareScorer.score(&mut game, Color::Dark), 0);
        assert_eq!(game, before);
    }

    #[test]
    fn tables_are_read_from_the_owner_side() {
        // Advanced pawns are worth more on either side of the board.
        let light_pawn = Piece::new(Color::Light, PieceKind::Pawn);
        let dark_pawn = Piece::new(Color::Dark, PieceKind::Pawn);
        assert_eq!(piece_square_value(light_pawn, sq("a7"), Color::Light), 50);
        assert_eq!(piece_square_value(dark_pawn, sq("h2"), Color::Dark), 50);
        assert_eq!(piece_square_value(light_pawn, sq("d2"), Color::Light), -20);

        // Opponent pieces are mirrored across files too.
        assert_eq!(piece_square_value(dark_pawn, sq("e7"), Color::Light), -20);
        assert_eq!(piece_square_value(dark_pawn, sq("a7"), Color::Light), 5);
        assert_eq!(piece_square_value(dark_pawn, sq("a7"), Color::Dark), 5);

        let light_king = Piece::new(Color::Light, PieceKind::King);
        assert_eq!(piece_square_value(light_king, sq("g1"), Color::Light), 30);
        assert_eq!(piece_square_value(light_king, sq("b1"), Color::Dark), 30);
    }

    #[test]
    fn material_edge_is_reported_with_the_right_sign() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").expect("FEN should parse");
        let light = PieceSquareScorer.score(&mut game, Color::Light);
        let dark = PieceSquareScorer.score(&mut game, Color::Dark);
        assert!(light > 800, "light score was {light}");
        assert_eq!(light, -dark);
    }

    #[test]
    fn mobility_hides_en_passant_from_the_waiting_side() {
        // Dark to move with an en-passant target on e3 for Dark only.
        let mut game =
            GameState::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        let before = game.clone();

        // Light: e5 plus five king moves. Dark: d3, dxe3 and five king moves.
        assert_eq!(PieceSquareScorer::mobility(&mut game, Color::Dark), 10);
        assert_eq!(PieceSquareScorer::mobility(&mut game, Color::Light), -10);
        assert_eq!(game, before);
    }
}
