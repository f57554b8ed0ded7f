//! Core value types shared by every subsystem.
//!
//! Colors, piece kinds, squares, castling rights and moves are all small
//! `Copy` values so move generation and search can pass them around freely
//! while the board itself is mutated in place.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank the color's king and rooks start on.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Rank direction pawns of this color advance in.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind. Color lives on [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase FEN letter.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for light, lowercase for dark.
    #[inline]
    pub fn to_fen_char(self) -> char {
        let base = self.kind.to_char();
        match self.color {
            Color::Light => base.to_ascii_uppercase(),
            Color::Dark => base,
        }
    }

    #[inline]
    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_char(ch).map(|kind| Piece::new(color, kind))
    }
}

/// Board coordinate. `file` 0 is the a-file, `rank` 0 is the first rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    /// Callers guarantee `file < 8 && rank < 8`; use [`Square::try_new`] otherwise.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn try_new(file: i8, rank: i8) -> Option<Self> {
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Self {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// Step by `(d_file, d_rank)`, returning `None` off the board.
    #[inline]
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Self::try_new(self.file as i8 + d_file, self.rank as i8 + d_rank)
    }

    /// True for a1-colored (dark) squares.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// Iterate all 64 squares, a1..h1 then a2..h2 and so on.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square::new(file, rank)))
    }
}

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// File the king lands on.
    #[inline]
    pub const fn king_to_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    #[inline]
    pub const fn rook_from_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    #[inline]
    pub const fn rook_to_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }
}

/// Castling rights as a set of named bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: Self = Self(0);
    pub const LIGHT_KINGSIDE: Self = Self(1 << 0);
    pub const LIGHT_QUEENSIDE: Self = Self(1 << 1);
    pub const DARK_KINGSIDE: Self = Self(1 << 2);
    pub const DARK_QUEENSIDE: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    /// The single right for `color` castling to `side`.
    #[inline]
    pub const fn for_side(color: Color, side: CastleSide) -> Self {
        match (color, side) {
            (Color::Light, CastleSide::Kingside) => Self::LIGHT_KINGSIDE,
            (Color::Light, CastleSide::Queenside) => Self::LIGHT_QUEENSIDE,
            (Color::Dark, CastleSide::Kingside) => Self::DARK_KINGSIDE,
            (Color::Dark, CastleSide::Queenside) => Self::DARK_QUEENSIDE,
        }
    }

    /// Both rights of `color`.
    #[inline]
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::Light => Self(Self::LIGHT_KINGSIDE.0 | Self::LIGHT_QUEENSIDE.0),
            Color::Dark => Self(Self::DARK_KINGSIDE.0 | Self::DARK_QUEENSIDE.0),
        }
    }

    /// The right tied to a rook standing on `square`, if it is a home corner.
    #[inline]
    pub const fn for_rook_home(square: Square) -> Option<Self> {
        match (square.file, square.rank) {
            (0, 0) => Some(Self::LIGHT_QUEENSIDE),
            (7, 0) => Some(Self::LIGHT_KINGSIDE),
            (0, 7) => Some(Self::DARK_QUEENSIDE),
            (7, 7) => Some(Self::DARK_KINGSIDE),
            _ => None,
        }
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A move as produced by the generator.
///
/// The moved and captured pieces are not stored here; the executor reads
/// them off the board and keeps them in the [`UndoState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            castle: None,
            en_passant: false,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            promotion: Some(promotion),
            ..Self::new(from, to)
        }
    }

    #[inline]
    pub const fn castling(from: Square, to: Square, side: CastleSide) -> Self {
        Self {
            castle: Some(side),
            ..Self::new(from, to)
        }
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self {
            en_passant: true,
            ..Self::new(from, to)
        }
    }

    /// Square of the piece this move captures, assuming it captures at all.
    #[inline]
    pub const fn capture_square(self) -> Square {
        if self.en_passant {
            Square::new(self.to.file, self.from.rank)
        } else {
            self.to
        }
    }
}
