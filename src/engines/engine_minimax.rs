use crate::chess_errors::ChessResult;
use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::minimax::minimax_search;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Fixed-depth alpha-beta engine playing `config.color`.
pub struct MinimaxEngine<S: BoardScorer = PieceSquareScorer> {
    config: EngineConfig,
    scorer: S,
}

impl MinimaxEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_scorer(config, PieceSquareScorer)
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(config: EngineConfig, scorer: S) -> Self {
        Self { config, scorer }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "PlumRules Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.config.set_option(name, value)
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let result = minimax_search(game_state, &self.scorer, self.config.color, self.config.depth)?;

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: result.score,
            nodes: result.nodes,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {}",
            self.config.depth, result.score, result.nodes
        ));
        if let Some(mv) = result.best_move {
            out.info_lines
                .push(format!("info string minimax_engine best {}", move_to_long_algebraic(mv)));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::MinimaxEngine;
    use crate::engines::engine_config::EngineConfig;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::chess_types::*;

    #[test]
    fn chooses_a_legal_move_and_restores_the_position() {
        let mut engine = MinimaxEngine::new(EngineConfig::default());
        engine.set_option("Depth", "2").expect("depth option");

        let mut game = GameState::new_game();
        game.make_move(Move::new(Square::new(4, 1), Square::new(4, 3)))
            .expect("e2e4 is legal");
        let before = game.clone();

        let out = engine.choose_move(&mut game).expect("search should run");
        assert_eq!(game, before);
        assert_eq!(game.undo_stack.len(), 1);

        let best = out.best_move.expect("Dark has replies");
        assert!(game.legal_moves().contains(&best));
        assert!(out.nodes > 20);
        assert_eq!(out.info_lines.len(), 2);
    }

    #[test]
    fn no_move_in_a_mated_position() {
        let mut engine = MinimaxEngine::new(EngineConfig {
            color: Color::Light,
            ..EngineConfig::default()
        });
        let mut game = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        let out = engine.choose_move(&mut game).expect("search should run");
        assert_eq!(out.best_move, None);
        assert_eq!(out.nodes, 1);
    }

    #[test]
    fn option_errors_surface_through_the_trait() {
        let mut engine = MinimaxEngine::new(EngineConfig::default());
        assert!(engine.set_option("Depth", "-1").is_err());
        assert!(engine.set_option("Color", "w").is_ok());
        assert_eq!(engine.config().color, Color::Light);
    }
}
