//! Legality filtering of pseudo-legal moves.
//!
//! A pseudo-legal move is legal when all of the following hold:
//! - it does not leave the mover's own king in check
//! - it is not a castle out of, through, or into check
//! - it does not capture a king
//!
//! The castling test covers the king's starting square as well as the
//! squares it crosses, so a king in check cannot castle.
//!
//! Every test plays the move on a throwaway copy of the board.

use chess_core::{Color, Coord, Move, MoveKind, PieceKind};

use crate::Board;

/// How a game ended for the side that has no legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move is in check.
    Checkmate,
    /// The side to move is not in check.
    Stalemate,
}

/// Returns true if playing `mv` from `from` leaves the mover's king in check.
///
/// A move that cannot be applied to the board counts as leading to check, so
/// it is never offered as legal.
pub fn move_leads_to_check(board: &Board, from: Coord, mv: Move) -> bool {
    let Some(color) = board.at(from).map(|piece| piece.color) else {
        return true;
    };
    let mut copy = board.clone();
    if copy.do_move(from, mv).is_err() {
        return true;
    }
    copy.is_in_check(color)
}

/// Returns true if a castling move starts on, passes through, or lands on an
/// attacked square. Non-castling moves are never rejected here.
///
/// The landing square is covered too, which duplicates the check filter for
/// the king itself but keeps this test self-contained.
pub fn castling_path_attacked(board: &Board, from: Coord, mv: Move) -> bool {
    let passed: &[u8] = match mv.kind {
        MoveKind::ShortCastle => &[5, 6],
        MoveKind::LongCastle => &[3, 2],
        _ => return false,
    };
    let Some(king) = board.at(from) else {
        return true;
    };
    if board.is_in_check(king.color) {
        return true;
    }
    passed.iter().any(|&file| {
        let Some(step) = from.with_file(file) else {
            return true;
        };
        let mut copy = board.clone();
        copy.do_move(from, Move::walk(step)).is_err() || copy.is_in_check(king.color)
    })
}

/// Returns true if `mv` captures a king.
pub fn captures_king(board: &Board, mv: Move) -> bool {
    mv.kind.is_capture()
        && board
            .at(mv.to)
            .is_some_and(|target| target.kind == PieceKind::King)
}

/// Returns the fully filtered legal moves of the piece at `from`.
pub fn legal_moves(board: &Board, from: Coord) -> Vec<Move> {
    let Some(piece) = board.at(from) else {
        return Vec::new();
    };
    piece
        .possible_moves(board)
        .into_iter()
        .filter(|&mv| {
            !captures_king(board, mv)
                && !castling_path_attacked(board, from, mv)
                && !move_leads_to_check(board, from, mv)
        })
        .collect()
}

/// Returns the moves of the piece at `from` that do not leave its own king in
/// check. Castling paths and king captures are not examined.
pub fn check_filtered_moves(board: &Board, from: Coord) -> Vec<Move> {
    let Some(piece) = board.at(from) else {
        return Vec::new();
    };
    piece
        .possible_moves(board)
        .into_iter()
        .filter(|&mv| !move_leads_to_check(board, from, mv))
        .collect()
}

/// Returns every legal move of `color`, paired with the mover's coordinate,
/// in board order.
pub fn all_legal_moves(board: &Board, color: Color) -> Vec<(Coord, Move)> {
    board
        .pieces_by_color(color)
        .flat_map(|piece| {
            legal_moves(board, piece.coord)
                .into_iter()
                .map(move |mv| (piece.coord, mv))
        })
        .collect()
}

/// Returns true if `color` has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_by_color(color)
        .any(|piece| !legal_moves(board, piece.coord).is_empty())
}

/// Classifies the position for `color` to move: `None` while a legal move
/// exists, otherwise checkmate or stalemate.
pub fn outcome(board: &Board, color: Color) -> Option<Outcome> {
    if has_legal_move(board, color) {
        None
    } else if board.is_in_check(color) {
        Some(Outcome::Checkmate)
    } else {
        Some(Outcome::Stalemate)
    }
}
