//! Terminal chess against a minimax AI.
//!
//! Moves are typed in coordinate notation (`e2e4`, `e7e8q` to promote to a
//! queen). `moves` lists the legal moves, `quit` leaves the game.

mod command;
mod config;
mod session;

use std::io;
use std::path::PathBuf;

use chess_ai::Difficulty;
use chess_core::Color;
use chess_engine::Game;
use clap::{Parser, ValueEnum};
use config::Config;
use session::Session;

/// Side selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Play chess against a minimax AI in the terminal.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess against a minimax AI")]
struct Args {
    /// AI strength: easy, medium or hard (search depth 2, 3 or 4)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Color played by the human
    #[arg(long, value_enum)]
    color: Option<Side>,

    /// Path to the TOML configuration file
    #[arg(long, default_value_os_t = Config::default_path())]
    config: PathBuf,

    /// Start from a FEN position instead of the initial layout
    #[arg(long)]
    fen: Option<String>,

    /// Let the AI play both sides
    #[arg(long)]
    ai_vs_ai: bool,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(difficulty) = args.difficulty {
        config.ai.difficulty = difficulty;
    }
    if let Some(side) = args.color {
        config.ai.player_color = side.into();
    }

    tracing::info!("Config file: {:?}", args.config);
    tracing::info!(
        "Difficulty: {} (depth {})",
        config.ai.difficulty,
        config.ai.depth()
    );
    tracing::info!("Human plays: {}", config.ai.player_color);

    let game = match &args.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), game, config)
        .ai_vs_ai(args.ai_vs_ai)
        .max_plies(args.max_plies);
    session.run()?;

    Ok(())
}
