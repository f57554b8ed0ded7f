//! Engine abstraction used by the command-line driver and the deferred search.
//!
//! An engine receives the live `GameState`, may explore it in place, and must
//! hand it back unchanged together with its chosen move.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<Move>,
    /// Score from the engine color's point of view.
    pub score: i32,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn set_option(&mut self, _name: &str, _value: &str) -> ChessResult<()> {
        Ok(())
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput>;
}
