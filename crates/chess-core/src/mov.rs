//! Move representation.

use crate::Coord;
use std::fmt;

/// The kind of a move.
///
/// The kind is fixed when the move is generated and fully determines the
/// side effects of playing it: which squares are vacated and occupied, and
/// which other piece (castling rook, captured pawn) is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Step onto an empty square.
    Walk = 0,
    /// Pawn advance of two squares from an unmoved pawn.
    DoubleWalk = 1,
    /// Capture of the enemy piece on the destination.
    Attack = 2,
    /// Castling with the rook on the h-file.
    ShortCastle = 3,
    /// Castling with the rook on the a-file.
    LongCastle = 4,
    /// Pawn capture of an enemy pawn that just advanced two squares.
    EnPassant = 5,
    /// Pawn walk onto the farthest rank.
    Promotion = 6,
    /// Pawn capture onto the farthest rank.
    AttackAndPromotion = 7,
}

impl MoveKind {
    /// Returns true if the move removes the piece standing on its destination.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::Attack | MoveKind::AttackAndPromotion)
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveKind::ShortCastle | MoveKind::LongCastle)
    }

    /// Returns true if the moving pawn reaches the farthest rank.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promotion | MoveKind::AttackAndPromotion)
    }

    /// Returns the promoting counterpart of a walk or attack.
    #[inline]
    pub const fn promoted(self) -> Self {
        match self {
            MoveKind::Walk => MoveKind::Promotion,
            MoveKind::Attack => MoveKind::AttackAndPromotion,
            other => other,
        }
    }
}

/// A move: its kind and the destination of the moving piece.
///
/// The origin is not part of the move; it is the coordinate of the piece
/// the move was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub to: Coord,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(kind: MoveKind, to: Coord) -> Self {
        Move { kind, to }
    }

    /// Creates a plain walk.
    #[inline]
    pub const fn walk(to: Coord) -> Self {
        Self::new(MoveKind::Walk, to)
    }

    /// Creates a plain capture.
    #[inline]
    pub const fn attack(to: Coord) -> Self {
        Self::new(MoveKind::Attack, to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Walk | MoveKind::DoubleWalk => write!(f, "{}", self.to),
            MoveKind::Attack => write!(f, "x{}", self.to),
            MoveKind::ShortCastle => write!(f, "O-O"),
            MoveKind::LongCastle => write!(f, "O-O-O"),
            MoveKind::EnPassant => write!(f, "x{} e.p.", self.to),
            MoveKind::Promotion => write!(f, "{}=", self.to),
            MoveKind::AttackAndPromotion => write!(f, "x{}=", self.to),
        }
    }
}
