//! Static evaluation: material, piece-square tables and check terms.

use chess_core::{Color, PieceKind};
use chess_engine::{Board, Piece};

/// Piece values in centipawns
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20_000;

/// Bonus for giving check, penalty for being in check.
const CHECK_BONUS: i32 = 50;

/// Piece-square tables from White's point of view, row 0 being the eighth
/// rank. Black reads them with the rows mirrored.
type Table = [[i32; 8]; 8];

const PAWN_PST: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_PST: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_PST: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_PST: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN_PST: Table = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING_PST: Table = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

/// Scores boards from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    color: Color,
}

impl Evaluator {
    /// Creates an evaluator scoring for `color`.
    pub const fn new(color: Color) -> Self {
        Evaluator { color }
    }

    /// Returns the material value of a piece kind.
    pub const fn material(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => PAWN_VALUE,
            PieceKind::Knight => KNIGHT_VALUE,
            PieceKind::Bishop => BISHOP_VALUE,
            PieceKind::Rook => ROOK_VALUE,
            PieceKind::Queen => QUEEN_VALUE,
            PieceKind::King => KING_VALUE,
        }
    }

    /// Returns the piece-square bonus of a piece where it stands.
    pub fn positional(piece: &Piece) -> i32 {
        let table = match piece.kind {
            PieceKind::Pawn => &PAWN_PST,
            PieceKind::Knight => &KNIGHT_PST,
            PieceKind::Bishop => &BISHOP_PST,
            PieceKind::Rook => &ROOK_PST,
            PieceKind::Queen => &QUEEN_PST,
            PieceKind::King => &KING_PST,
        };
        let rank = piece.coord.rank() as usize;
        let row = match piece.color {
            Color::White => rank,
            Color::Black => 7 - rank,
        };
        table[row][piece.coord.file() as usize]
    }

    /// Scores the board: positive favors this evaluator's side.
    pub fn evaluate(&self, board: &Board) -> i32 {
        let mut score: i32 = board
            .pieces()
            .map(|piece| {
                let value = Self::material(piece.kind) + Self::positional(piece);
                if piece.color == self.color {
                    value
                } else {
                    -value
                }
            })
            .sum();

        if board.is_in_check(self.color.opposite()) {
            score += CHECK_BONUS;
        }
        if board.is_in_check(self.color) {
            score -= CHECK_BONUS;
        }
        score
    }
}
