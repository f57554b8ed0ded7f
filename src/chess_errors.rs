//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by game-state operations,
//! notation helpers and engines. Malformed FEN input gets its own enum,
//! `FenError`, so callers can tell exactly which field was rejected; it
//! converts into `ChessError::Parse` through `?`.
//!
//! Every error here is local and synchronous. None of them leaves a
//! `GameState` partially modified: the operation that failed either never
//! touched the state or worked on a scratch copy.

use thiserror::Error;

use crate::game_state::chess_types::Color;

/// A FEN string was rejected. Each variant carries the offending token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must have 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),

    #[error("invalid empty-square count '{0}'")]
    InvalidEmptyRun(char),

    /// `rank` is the FEN rank label (8 for the first group).
    #[error("rank {rank} describes {files} files, expected 8")]
    RankLength { rank: u8, files: usize },

    #[error("more than one king for {0:?}")]
    DuplicateKing(Color),

    #[error("invalid side-to-move field '{0}'")]
    SideToMove(String),

    #[error("invalid castling rights field '{0}'")]
    CastlingRights(String),

    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),

    #[error("invalid halfmove clock '{0}'")]
    HalfmoveClock(String),

    #[error("invalid fullmove number '{0}'")]
    FullmoveNumber(String),
}

/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Malformed serialized position.
    #[error("malformed FEN: {0}")]
    Parse(#[from] FenError),

    /// The requested move is not in the current legal-move set.
    #[error("illegal move requested: {0}")]
    IllegalMove(String),

    #[error("invalid square notation '{0}'")]
    InvalidSquare(String),

    #[error("invalid move notation '{0}'")]
    InvalidMoveNotation(String),

    /// The executor was handed a move whose origin is empty.
    #[error("no piece on square {0}")]
    NoPieceOnSquare(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: String, value: String },

    #[error("deferred search worker panicked")]
    SearchWorkerPanicked,
}

/// Result alias for rules-engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
