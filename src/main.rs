//! Command-line driver: perft counts, single searches, and engine self-play.
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use std::sync::mpsc::channel;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_rules::chess_errors::{ChessError, ChessResult};
use plum_rules::engines::deferred_search::{DeferredOutcome, DeferredSearch};
use plum_rules::engines::engine_config::{parse_color, EngineConfig};
use plum_rules::engines::engine_minimax::MinimaxEngine;
use plum_rules::engines::engine_trait::Engine;
use plum_rules::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_rules::game_state::game_state::GameState;
use plum_rules::move_generation::perft::perft;
use plum_rules::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};
use plum_rules::utils::render_game_state::render_game_state;

#[derive(Parser)]
#[command(name = "plum_rules")]
#[command(about = "Chess rules engine and minimax player", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes and move categories to a fixed depth
    Perft {
        #[arg(short, long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(short, long, default_value = "4")]
        depth: u8,
    },

    /// Search one position and print the best move
    Search {
        #[arg(short, long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        /// Moves in long algebraic notation applied before searching
        #[arg(short, long, num_args = 0..)]
        moves: Vec<String>,

        #[arg(short, long, default_value = "3")]
        depth: u8,

        /// Engine color (w or b); defaults to the side to move
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Let the engine play both sides through the deferred search
    Play {
        #[arg(short, long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(short, long, default_value = "3")]
        depth: u8,

        /// Maximum number of half-moves to play
        #[arg(short, long, default_value = "40")]
        plies: u32,

        #[arg(short, long, default_value = "100")]
        think_ms: u64,
    },
}

fn main() -> ChessResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match Args::parse().command {
        Command::Perft { fen, depth } => run_perft(&fen, depth),
        Command::Search {
            fen,
            moves,
            depth,
            color,
        } => run_search(&fen, &moves, depth, color.as_deref()),
        Command::Play {
            fen,
            depth,
            plies,
            think_ms,
        } => run_play(&fen, depth, plies, Duration::from_millis(think_ms)),
    }
}

fn run_perft(fen: &str, depth: u8) -> ChessResult<()> {
    let mut game = GameState::from_fen(fen)?;
    let counts = perft(&mut game, depth)?;

    println!("depth      {depth}");
    println!("nodes      {}", counts.nodes);
    println!("captures   {}", counts.captures);
    println!("en passant {}", counts.en_passant);
    println!("castles    {}", counts.castles);
    println!("promotions {}", counts.promotions);
    println!("checks     {}", counts.checks);
    println!("checkmates {}", counts.checkmates);
    Ok(())
}

fn run_search(fen: &str, moves: &[String], depth: u8, color: Option<&str>) -> ChessResult<()> {
    let mut game = GameState::from_fen(fen)?;
    for text in moves {
        let mv = parse_long_algebraic(&mut game, text)?;
        game.make_move(mv)?;
    }

    let color = match color {
        Some(value) => parse_color(value).ok_or_else(|| ChessError::InvalidOption {
            name: "color".to_owned(),
            value: value.to_owned(),
        })?,
        None => game.side_to_move,
    };

    let mut engine = MinimaxEngine::new(EngineConfig {
        color,
        depth,
        think_delay: Duration::ZERO,
    });
    let out = engine.choose_move(&mut game)?;

    println!("{}", render_game_state(&game));
    match out.best_move {
        Some(mv) => println!(
            "bestmove {} score {} nodes {}",
            move_to_long_algebraic(mv),
            out.score,
            out.nodes
        ),
        None => println!("bestmove (none) score {}", out.score),
    }
    Ok(())
}

fn run_play(fen: &str, depth: u8, plies: u32, think_delay: Duration) -> ChessResult<()> {
    let mut game = GameState::from_fen(fen)?;
    let mut engine = MinimaxEngine::new(EngineConfig {
        color: game.side_to_move,
        depth,
        think_delay,
    });
    println!("{}\n", render_game_state(&game));

    for ply in 0..plies {
        if game.is_checkmate() {
            info!(winner = ?game.side_to_move.opposite(), "checkmate");
            break;
        }
        if game.is_draw() {
            info!(fen = %game.get_fen(), "draw");
            break;
        }

        engine.config_mut().color = game.side_to_move;
        let delay = engine.config().think_delay;
        let (tx, rx) = channel();
        let pending = DeferredSearch::schedule(engine, game, delay, move |state, outcome| {
            // The driver owns the receiver until the worker is joined.
            let _ = tx.send((state, outcome));
        });
        engine = pending.join()?;
        let (state, outcome) = rx.recv().map_err(|_| ChessError::SearchWorkerPanicked)?;
        game = state;

        let output = match outcome {
            DeferredOutcome::Completed(output) => output,
            DeferredOutcome::Failed(err) => return Err(err),
            DeferredOutcome::Cancelled => break,
        };
        let Some(mv) = output.best_move else {
            break;
        };

        game.make_move(mv)?;
        info!(ply, mv = %move_to_long_algebraic(mv), score = output.score, "engine move");
        println!("{}", render_game_state(&game));
        println!("{}\n", game.get_fen());
    }

    Ok(())
}
