//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and the
//! search:
//! - [`Color`] and [`PieceKind`]
//! - [`Coord`] for board coordinates
//! - [`Move`] and [`MoveKind`] for move descriptors
//! - FEN parsing

mod color;
mod coord;
mod fen;
mod mov;
mod piece;

pub use color::Color;
pub use coord::Coord;
pub use fen::{Castling, Fen, FenError};
pub use mov::{Move, MoveKind};
pub use piece::PieceKind;
