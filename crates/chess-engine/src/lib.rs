//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - the pieces of both colors on a 64-slot table
//! - [`Piece`] - a piece with its moved-flags
//! - Pseudo-legal move generation via [`Piece::possible_moves`]
//! - The [`legality`] filter and check, checkmate and stalemate detection
//! - [`Game`] - a turn-based session with promotion handling
//!
//! # Example
//!
//! ```
//! use chess_core::Coord;
//! use chess_engine::Game;
//!
//! let mut game = Game::new();
//! let e2 = Coord::from_algebraic("e2").unwrap();
//! let e4 = Coord::from_algebraic("e4").unwrap();
//! game.play(e2, e4).unwrap();
//! println!("{}", game.board());
//! ```

mod board;
mod game;
pub mod legality;
mod movegen;

pub use board::{Board, BoardError, Piece};
pub use game::{Game, GameError, GameState};
pub use legality::Outcome;
