//! Pseudo-legal move generation.
//!
//! Each piece kind encodes its movement geometry here. The moves produced
//! respect board boundaries, blocking pieces and the special pawn and king
//! rules, but ignore whether the mover's own king ends up in check; see
//! [`crate::legality`] for that.

use chess_core::{Coord, Move, MoveKind, PieceKind};

use crate::{Board, Piece};

/// Knight jumps.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
];

/// King steps.
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];

/// Files that must be empty for long castling.
const LONG_CASTLE_GAP: [u8; 3] = [1, 2, 3];

/// Files that must be empty for short castling.
const SHORT_CASTLE_GAP: [u8; 2] = [5, 6];

impl Piece {
    /// Generates the pseudo-legal moves of this piece on `board`.
    pub fn possible_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::with_capacity(28);
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(board, &mut moves),
            PieceKind::Knight => self.step_moves(board, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::Bishop => self.ray_moves(board, &DIAGONAL, &mut moves),
            PieceKind::Rook => self.ray_moves(board, &ORTHOGONAL, &mut moves),
            PieceKind::Queen => {
                self.ray_moves(board, &ORTHOGONAL, &mut moves);
                self.ray_moves(board, &DIAGONAL, &mut moves);
            }
            PieceKind::King => {
                self.step_moves(board, &KING_OFFSETS, &mut moves);
                self.castling_moves(board, &mut moves);
            }
        }
        moves
    }

    /// Classifies a reachable square: a walk if empty, an attack if it
    /// holds an enemy, nothing if it holds a friend.
    fn target(&self, board: &Board, to: Coord) -> Option<Move> {
        match board.at(to) {
            None => Some(Move::walk(to)),
            Some(other) if other.color != self.color => Some(Move::attack(to)),
            Some(_) => None,
        }
    }

    fn step_moves(&self, board: &Board, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        moves.extend(
            offsets
                .iter()
                .filter_map(|&(dr, df)| self.coord.offset(dr, df))
                .filter_map(|to| self.target(board, to)),
        );
    }

    fn ray_moves(&self, board: &Board, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(dr, df) in directions {
            let mut next = self.coord.offset(dr, df);
            while let Some(to) = next {
                match self.target(board, to) {
                    Some(mv) if mv.kind == MoveKind::Walk => moves.push(mv),
                    Some(mv) => {
                        moves.push(mv);
                        break;
                    }
                    None => break,
                }
                next = to.offset(dr, df);
            }
        }
    }

    fn pawn_moves(&self, board: &Board, moves: &mut Vec<Move>) {
        let forward = self.color.forward();
        let start = moves.len();

        if let Some(one) = self.coord.offset(forward, 0) {
            if board.is_empty(one) {
                moves.push(Move::walk(one));
                if !self.has_moved {
                    if let Some(two) = one.offset(forward, 0) {
                        if board.is_empty(two) {
                            moves.push(Move::new(MoveKind::DoubleWalk, two));
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(to) = self.coord.offset(forward, side) else {
                continue;
            };
            if board.at(to).is_some_and(|other| other.color != self.color) {
                moves.push(Move::attack(to));
            }
        }

        for side in [-1, 1] {
            let (Some(beside), Some(to)) = (
                self.coord.offset(0, side),
                self.coord.offset(forward, side),
            ) else {
                continue;
            };
            if board.is_empty(to) && self.can_take_en_passant(board, beside) {
                moves.push(Move::new(MoveKind::EnPassant, to));
            }
        }

        let promotion_rank = self.color.promotion_rank();
        for mv in &mut moves[start..] {
            if mv.to.rank() == promotion_rank {
                mv.kind = mv.kind.promoted();
            }
        }
    }

    /// An enemy pawn beside us can be taken en passant only right after its
    /// double step, i.e. while it is still the last piece that moved.
    fn can_take_en_passant(&self, board: &Board, beside: Coord) -> bool {
        let Some(other) = board.at(beside) else {
            return false;
        };
        other.color != self.color
            && other.kind == PieceKind::Pawn
            && other.double_stepped
            && board.last_moved().is_some_and(|last| last.coord == beside)
    }

    /// Offers castling when king and rook are unmoved and the squares
    /// between them are empty. Whether the king passes through check is
    /// decided by the legality filter.
    fn castling_moves(&self, board: &Board, moves: &mut Vec<Move>) {
        if self.has_moved {
            return;
        }
        let sides = [
            (0, &LONG_CASTLE_GAP[..], 2, MoveKind::LongCastle),
            (7, &SHORT_CASTLE_GAP[..], 6, MoveKind::ShortCastle),
        ];
        for (rook_file, gap, king_file, kind) in sides {
            let rook_ready = self
                .coord
                .with_file(rook_file)
                .and_then(|at| board.at(at))
                .is_some_and(|rook| {
                    rook.color == self.color && rook.kind == PieceKind::Rook && !rook.has_moved
                });
            let gap_clear = gap
                .iter()
                .all(|&file| self.coord.with_file(file).is_some_and(|c| board.is_empty(c)));
            if rook_ready && gap_clear {
                if let Some(to) = self.coord.with_file(king_file) {
                    moves.push(Move::new(kind, to));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn moves_at(board: &Board, at: &str) -> Vec<Move> {
        board.at(sq(at)).unwrap().possible_moves(board)
    }

    #[test]
    fn startpos_move_counts() {
        let board = Board::standard();
        let white: usize = board
            .pieces_by_color(Color::White)
            .map(|p| p.possible_moves(&board).len())
            .sum();
        let black: usize = board
            .pieces_by_color(Color::Black)
            .map(|p| p.possible_moves(&board).len())
            .sum();
        assert_eq!(white, 20);
        assert_eq!(black, 20);
    }

    #[test]
    fn pawn_single_and_double_walk() {
        let board = Board::standard();
        let moves = moves_at(&board, "e2");
        assert_eq!(
            moves,
            vec![
                Move::walk(sq("e3")),
                Move::new(MoveKind::DoubleWalk, sq("e4"))
            ]
        );
        let moves = moves_at(&board, "d7");
        assert_eq!(
            moves,
            vec![
                Move::walk(sq("d6")),
                Move::new(MoveKind::DoubleWalk, sq("d5"))
            ]
        );
    }

    #[test]
    fn pawn_double_walk_needs_both_squares() {
        // Blocked directly in front.
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(moves_at(&board, "e2").is_empty());

        // Blocked on the second square only.
        let board = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&board, "e2"), vec![Move::walk(sq("e3"))]);
    }

    #[test]
    fn moved_pawn_has_no_double_walk() {
        let board = Board::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&board, "e3"), vec![Move::walk(sq("e4"))]);
    }

    #[test]
    fn pawn_captures_enemies_only() {
        let board = Board::from_fen("4k3/8/8/3p1N2/4P3/8/8/4K3 w - - 0 1").unwrap();
        let moves = moves_at(&board, "e4");
        assert!(moves.contains(&Move::attack(sq("d5"))));
        assert!(!moves.iter().any(|m| m.to == sq("f5")));
        assert!(moves.contains(&Move::walk(sq("e5"))));
    }

    #[test]
    fn pawn_promotion_kinds() {
        let board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = moves_at(&board, "a7");
        assert_eq!(
            moves,
            vec![
                Move::new(MoveKind::Promotion, sq("a8")),
                Move::new(MoveKind::AttackAndPromotion, sq("b8")),
            ]
        );

        let board = Board::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").unwrap();
        assert_eq!(
            moves_at(&board, "a2"),
            vec![Move::new(MoveKind::Promotion, sq("a1"))]
        );
    }

    #[test]
    fn pawn_on_last_rank_has_no_moves() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut pawn = Piece::new(Color::White, PieceKind::Pawn, sq("c8"));
        pawn.has_moved = true;
        board.add(pawn);
        assert!(moves_at(&board, "c8").is_empty());
    }

    #[test]
    fn en_passant_requires_last_moved_double_step() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert!(moves_at(&board, "e5").contains(&Move::new(MoveKind::EnPassant, sq("d6"))));

        // Same squares, but the black pawn did not just double step.
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(!moves_at(&board, "e5")
            .iter()
            .any(|m| m.kind == MoveKind::EnPassant));
    }

    #[test]
    fn knight_from_corner() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        let mut targets: Vec<Coord> = moves_at(&board, "a1").iter().map(|m| m.to).collect();
        targets.sort();
        let mut expected = vec![sq("b3"), sq("c2")];
        expected.sort();
        assert_eq!(targets, expected);
    }

    #[test]
    fn rook_rays_stop_at_first_piece() {
        let board = Board::from_fen("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1").unwrap();
        let moves = moves_at(&board, "d4");
        // c4 walk, b4 attack; e4, f4 walk; g4 friendly; 4 up, 3 down
        assert!(moves.contains(&Move::walk(sq("c4"))));
        assert!(moves.contains(&Move::attack(sq("b4"))));
        assert!(!moves.iter().any(|m| m.to == sq("a4")));
        assert!(moves.contains(&Move::walk(sq("f4"))));
        assert!(!moves.iter().any(|m| m.to == sq("g4")));
        assert_eq!(moves.len(), 2 + 2 + 4 + 3);
        assert_eq!(moves.iter().filter(|m| m.kind == MoveKind::Attack).count(), 1);
    }

    #[test]
    fn bishop_and_queen_geometry() {
        let board = Board::from_fen("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_at(&board, "d4").len(), 13);

        let board = Board::from_fen("4k3/8/8/8/3Q4/8/7K/8 w - - 0 1").unwrap();
        assert_eq!(moves_at(&board, "d4").len(), 27);
    }

    #[test]
    fn king_steps_and_castling() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = moves_at(&board, "e1");
        assert!(moves.contains(&Move::new(MoveKind::ShortCastle, sq("g1"))));
        assert!(moves.contains(&Move::new(MoveKind::LongCastle, sq("c1"))));
        assert_eq!(moves.len(), 5 + 2);
    }

    #[test]
    fn castling_blocked_or_moved() {
        // Knight on b1 blocks the long side only.
        let board = Board::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
        let moves = moves_at(&board, "e1");
        assert!(moves.contains(&Move::new(MoveKind::ShortCastle, sq("g1"))));
        assert!(!moves.iter().any(|m| m.kind == MoveKind::LongCastle));

        // Rooks present but castling rights gone: both have moved.
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(!moves_at(&board, "e1").iter().any(|m| m.kind.is_castle()));
    }

    #[test]
    fn moves_never_leave_the_board() {
        let board = Board::from_fen("k7/8/8/8/8/8/8/Q6K w - - 0 1").unwrap();
        for piece in board.pieces() {
            for mv in piece.possible_moves(&board) {
                assert!(mv.to.rank() < 8 && mv.to.file() < 8);
            }
        }
    }
}
