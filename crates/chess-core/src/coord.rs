//! Board coordinate representation.

use std::fmt;

/// A coordinate on the 8x8 board.
///
/// Ranks count from the top of the board as seen by White: rank 0 holds
/// Black's back row and rank 7 holds White's. Files count from the a-file.
/// So `e2` is rank 6, file 4.
///
/// A `Coord` is always on the board. Stepping off the board yields `None`
/// from [`Coord::new`] and [`Coord::offset`], never a coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    rank: u8,
    file: u8,
}

impl Coord {
    /// Creates a coordinate, or `None` if it lies off the board.
    #[inline]
    pub const fn new(rank: i8, file: i8) -> Option<Self> {
        if rank >= 0 && rank < 8 && file >= 0 && file < 8 {
            Some(Coord {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Creates a coordinate from its index (rank * 8 + file).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Coord {
                rank: (index / 8) as u8,
                file: (index % 8) as u8,
            })
        } else {
            None
        }
    }

    /// Parses algebraic notation (e.g. "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank)
        {
            return None;
        }
        let file = file as i8 - b'a' as i8;
        let rank = 7 - (rank as i8 - b'1' as i8);
        Coord::new(rank, file)
    }

    /// Returns the rank (0-7, 0 at the top).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the file (0-7, 0 is the a-file).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the storage index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// Steps by the given rank and file deltas.
    #[inline]
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        Coord::new(self.rank as i8 + rank_delta, self.file as i8 + file_delta)
    }

    /// Returns the coordinate on the same rank at the given file.
    #[inline]
    pub const fn with_file(self, file: u8) -> Option<Self> {
        Coord::new(self.rank as i8, file as i8)
    }

    /// Returns the algebraic notation for this coordinate.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, 8 - self.rank)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Coord({}, {} = {})",
            self.rank,
            self.file,
            self.to_algebraic()
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
