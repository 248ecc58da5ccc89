//! Parsing of lines typed by the human player.

use chess_core::{Coord, PieceKind};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid square: {0}")]
    InvalidSquare(String),
    #[error("Invalid promotion piece '{0}', expected q, r, b or n")]
    InvalidPromotion(char),
    #[error("Unrecognized input '{0}', expected a move like e2e4 or 'quit'")]
    Unrecognized(String),
}

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move a piece in coordinate notation, with an optional promotion piece.
    Move {
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    },
    /// Print the legal moves of the side to move.
    Moves,
    Quit,
}

impl Command {
    /// Parse a line such as `e2e4`, `e7e8q`, `moves` or `quit`.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        match input {
            "quit" | "exit" => return Ok(Command::Quit),
            "moves" => return Ok(Command::Moves),
            _ => {}
        }

        if !input.is_ascii() || !(4..=5).contains(&input.len()) {
            return Err(CommandError::Unrecognized(input.to_string()));
        }
        let square = |s: &str| {
            Coord::from_algebraic(s).ok_or_else(|| CommandError::InvalidSquare(s.to_string()))
        };
        let from = square(&input[0..2])?;
        let to = square(&input[2..4])?;
        let promotion = match input[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PieceKind::from_letter(c)
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or(CommandError::InvalidPromotion(c))?,
            ),
        };
        Ok(Command::Move {
            from,
            to,
            promotion,
        })
    }
}
