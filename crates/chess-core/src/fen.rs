//! FEN (Forsyth-Edwards Notation) parsing.

use crate::{Color, Coord, PieceKind};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling availability: {0}")]
    InvalidCastling(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidCounter(String),
}

/// Castling availability as listed in a FEN record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Castling {
    pub white_short: bool,
    pub white_long: bool,
    pub black_short: bool,
    pub black_long: bool,
}

impl Castling {
    /// Returns whether `color` may still castle on the short side.
    pub const fn short(self, color: Color) -> bool {
        match color {
            Color::White => self.white_short,
            Color::Black => self.black_short,
        }
    }

    /// Returns whether `color` may still castle on the long side.
    pub const fn long(self, color: Color) -> bool {
        match color {
            Color::White => self.white_long,
            Color::Black => self.black_long,
        }
    }
}

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Every piece on the board, top rank first.
    pub pieces: Vec<(Coord, PieceKind, Color)>,
    pub active: Color,
    pub castling: Castling,
    /// Square skipped by a pawn that just advanced two squares.
    pub en_passant: Option<Coord>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let &[placement, active, castling, en_passant, halfmove, fullmove] = parts.as_slice() else {
            return Err(FenError::InvalidPartCount(parts.len()));
        };

        let pieces = Self::parse_placement(placement)?;

        let active = match active {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(castling)?;
        let en_passant = Self::parse_en_passant(en_passant)?;

        let halfmove_clock = halfmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidCounter(halfmove.to_string()))?;
        let fullmove_number = fullmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidCounter(fullmove.to_string()))?;

        Ok(Fen {
            pieces,
            active,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<Vec<(Coord, PieceKind, Color)>, FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut pieces = Vec::new();
        for (rank, row) in rows.iter().enumerate() {
            let mut file = 0u32;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip;
                    continue;
                }
                let (kind, color) = PieceKind::from_fen_char(c).ok_or_else(|| {
                    FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - rank
                    ))
                })?;
                if let Some(coord) = Coord::new(rank as i8, file as i8) {
                    pieces.push((coord, kind, color));
                }
                file += 1;
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - rank,
                    file
                )));
            }
        }

        Ok(pieces)
    }

    fn parse_castling(castling: &str) -> Result<Castling, FenError> {
        let mut rights = Castling::default();
        if castling == "-" {
            return Ok(rights);
        }
        for c in castling.chars() {
            match c {
                'K' => rights.white_short = true,
                'Q' => rights.white_long = true,
                'k' => rights.black_short = true,
                'q' => rights.black_long = true,
                other => {
                    return Err(FenError::InvalidCastling(format!(
                        "invalid character '{}'",
                        other
                    )))
                }
            }
        }
        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Coord>, FenError> {
        if ep == "-" {
            return Ok(None);
        }
        match Coord::from_algebraic(ep) {
            // Only the third and sixth ranks can be skipped by a double step.
            Some(coord) if coord.rank() == 2 || coord.rank() == 5 => Ok(Some(coord)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}
