//! Computer opponent for the chess engine.
//!
//! - [`AiConfig`] and [`Difficulty`] - who the AI plays and how deep it looks
//! - [`Evaluator`] - material and piece-square evaluation
//! - [`Searcher`] - fixed-depth minimax with alpha-beta pruning

mod config;
mod eval;
mod search;

pub use config::{AiConfig, Difficulty, ParseDifficultyError};
pub use eval::Evaluator;
pub use search::{BestMove, Searcher};
