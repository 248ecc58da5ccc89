//! Board state: the live pieces of both colors.

use std::fmt;

use chess_core::{Color, Coord, Fen, FenError, Move, MoveKind, PieceKind};
use thiserror::Error;

/// Errors raised when a board mutation does not fit the pieces on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no piece at {0}")]
    NoPieceAt(Coord),

    #[error("no unmoved rook to castle with at {0}")]
    MissingCastlingRook(Coord),

    #[error("cannot promote the piece at {0} to {1}")]
    InvalidPromotion(Coord, PieceKind),
}

/// A piece standing on a board.
///
/// Pieces are plain values owned by exactly one board; copying a board
/// copies every piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub coord: Coord,
    /// Set once the piece has made any move.
    pub has_moved: bool,
    /// Set when the piece's last move was a pawn double step.
    pub double_stepped: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    pub const fn new(color: Color, kind: PieceKind, coord: Coord) -> Self {
        Piece {
            color,
            kind,
            coord,
            has_moved: false,
            double_stepped: false,
        }
    }

    /// Returns the FEN letter of this piece.
    pub const fn fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }
}

/// The back row of the initial layout, a-file first.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The set of live pieces for both colors.
///
/// Pieces live in a 64-slot table indexed by [`Coord::index`], so at most one
/// piece occupies any coordinate and a piece is addressed by where it stands.
/// Cloning a board yields a fully independent copy.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    last_moved: Option<Coord>,
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
            last_moved: None,
        }
    }

    /// Creates a board holding the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        board.init();
        board
    }

    /// Resets the board to the standard starting layout.
    pub fn init(&mut self) {
        self.clear();
        for color in Color::BOTH {
            let home = color.home_rank() as i8;
            let pawns = color.pawn_rank() as i8;
            for (file, kind) in (0i8..).zip(BACK_ROW) {
                if let Some(coord) = Coord::new(home, file) {
                    self.add(Piece::new(color, kind, coord));
                }
                if let Some(coord) = Coord::new(pawns, file) {
                    self.add(Piece::new(color, PieceKind::Pawn, coord));
                }
            }
        }
    }

    /// Builds a board from a FEN record.
    ///
    /// Moved-flags are derived from the record: pawns off their initial rank
    /// have moved, and kings and rooks count as unmoved only where the
    /// castling field still allows them to castle. A listed en passant square
    /// marks the pawn in front of it as the last moved piece.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen = Fen::parse(fen)?;
        Ok(Self::from_parsed(&fen))
    }

    /// Builds a board from an already parsed FEN record.
    pub fn from_parsed(fen: &Fen) -> Self {
        let mut board = Board::empty();
        for &(coord, kind, color) in &fen.pieces {
            let mut piece = Piece::new(color, kind, coord);
            piece.has_moved = match kind {
                PieceKind::Pawn => coord.rank() != color.pawn_rank(),
                PieceKind::King | PieceKind::Rook => true,
                _ => false,
            };
            board.add(piece);
        }

        for color in Color::BOTH {
            let home = color.home_rank() as i8;
            let sides = [(fen.castling.short(color), 7), (fen.castling.long(color), 0)];
            for (allowed, rook_file) in sides {
                if !allowed {
                    continue;
                }
                let king = Coord::new(home, 4);
                let rook = Coord::new(home, rook_file);
                if let (Some(king), Some(rook)) = (king, rook) {
                    board.mark_unmoved(king, color, PieceKind::King);
                    board.mark_unmoved(rook, color, PieceKind::Rook);
                }
            }
        }

        if let Some(target) = fen.en_passant {
            // The pawn stands one step past the skipped square.
            let mover = fen.active.opposite();
            if let Some(pawn_at) = target.offset(mover.forward(), 0) {
                if let Some(Some(pawn)) = board.squares.get_mut(pawn_at.index()) {
                    if pawn.kind == PieceKind::Pawn && pawn.color == mover {
                        pawn.double_stepped = true;
                        pawn.has_moved = true;
                        board.last_moved = Some(pawn_at);
                    }
                }
            }
        }

        board
    }

    fn mark_unmoved(&mut self, coord: Coord, color: Color, kind: PieceKind) {
        if let Some(Some(piece)) = self.squares.get_mut(coord.index()) {
            if piece.color == color && piece.kind == kind {
                piece.has_moved = false;
            }
        }
    }

    /// Returns the piece at the given coordinate, if any.
    #[inline]
    pub fn at(&self, coord: Coord) -> Option<&Piece> {
        self.squares[coord.index()].as_ref()
    }

    /// Returns the piece at a raw (rank, file) pair.
    ///
    /// Off-board input yields `None`, the same as an empty square.
    pub fn at_offset(&self, rank: i32, file: i32) -> Option<&Piece> {
        let rank = i8::try_from(rank).ok()?;
        let file = i8::try_from(file).ok()?;
        self.at(Coord::new(rank, file)?)
    }

    /// Returns true if no piece stands on the coordinate.
    #[inline]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.squares[coord.index()].is_none()
    }

    /// Places a piece at its coordinate, replacing whatever stood there.
    pub fn add(&mut self, piece: Piece) {
        self.squares[piece.coord.index()] = Some(piece);
    }

    /// Removes and returns the piece at the coordinate.
    pub fn destroy(&mut self, coord: Coord) -> Option<Piece> {
        if self.last_moved == Some(coord) {
            self.last_moved = None;
        }
        self.squares[coord.index()].take()
    }

    /// Removes every piece.
    pub fn clear(&mut self) {
        self.squares = [None; 64];
        self.last_moved = None;
    }

    /// Iterates over the pieces of one color in board order.
    pub fn pieces_by_color(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }

    /// Iterates over every piece in board order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten()
    }

    /// Returns the king of the given color.
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces_by_color(color)
            .find(|piece| piece.kind == PieceKind::King)
    }

    /// Returns the piece that made the most recent move, if it is still on
    /// the board.
    pub fn last_moved(&self) -> Option<&Piece> {
        self.at(self.last_moved?)
    }

    /// Applies a move for the piece standing at `from`.
    ///
    /// Captures remove the piece on the destination, en passant removes the
    /// pawn beside the mover, and castling also walks the rook. Promotion
    /// moves leave a pawn on the farthest rank; call [`Board::promote`] to
    /// replace it.
    pub fn do_move(&mut self, from: Coord, mv: Move) -> Result<(), BoardError> {
        let mut piece = self.squares[from.index()].ok_or(BoardError::NoPieceAt(from))?;

        match mv.kind {
            MoveKind::Attack | MoveKind::AttackAndPromotion => {
                self.destroy(mv.to);
            }
            MoveKind::EnPassant => {
                // The passed pawn stands beside the mover, on the destination file.
                if let Some(victim) = from.with_file(mv.to.file()) {
                    self.destroy(victim);
                }
            }
            MoveKind::ShortCastle => self.castle_rook(from, 7, 5)?,
            MoveKind::LongCastle => self.castle_rook(from, 0, 3)?,
            MoveKind::Walk | MoveKind::DoubleWalk | MoveKind::Promotion => {}
        }

        self.squares[from.index()] = None;
        piece.coord = mv.to;
        piece.has_moved = true;
        piece.double_stepped = mv.kind == MoveKind::DoubleWalk;
        self.squares[mv.to.index()] = Some(piece);
        self.last_moved = Some(mv.to);
        Ok(())
    }

    fn castle_rook(&mut self, king_at: Coord, from_file: u8, to_file: u8) -> Result<(), BoardError> {
        let rook_from = king_at
            .with_file(from_file)
            .ok_or(BoardError::NoPieceAt(king_at))?;
        let rook_to = king_at
            .with_file(to_file)
            .ok_or(BoardError::NoPieceAt(king_at))?;
        let mut rook = match self.squares[rook_from.index()] {
            Some(rook) if rook.kind == PieceKind::Rook => rook,
            _ => return Err(BoardError::MissingCastlingRook(rook_from)),
        };
        self.squares[rook_from.index()] = None;
        rook.coord = rook_to;
        rook.has_moved = true;
        rook.double_stepped = false;
        self.squares[rook_to.index()] = Some(rook);
        Ok(())
    }

    /// Replaces the pawn at `at` with a piece of the given kind.
    ///
    /// The new piece keeps the pawn's moved-flag and last-moved status.
    pub fn promote(&mut self, at: Coord, kind: PieceKind) -> Result<(), BoardError> {
        let slot = &mut self.squares[at.index()];
        match slot {
            Some(piece) if piece.kind == PieceKind::Pawn && kind.is_promotion_target() => {
                piece.kind = kind;
                piece.double_stepped = false;
                Ok(())
            }
            Some(_) => Err(BoardError::InvalidPromotion(at, kind)),
            None => Err(BoardError::NoPieceAt(at)),
        }
    }

    /// Returns true if the king of `color` is attacked.
    ///
    /// Every enemy piece generates its pseudo-legal moves and the king is in
    /// check if any capture lands on it. No legality filtering happens here.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.pieces_by_color(color.opposite()).any(|enemy| {
            enemy.possible_moves(self).into_iter().any(|mv| {
                mv.kind.is_capture()
                    && self
                        .at(mv.to)
                        .is_some_and(|target| target.color == color && target.kind == PieceKind::King)
            })
        })
    }

    /// Returns the piece placement field of FEN for this board.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for rank in 0..8i8 {
            let mut empty = 0;
            for file in 0..8i8 {
                match Coord::new(rank, file).and_then(|c| self.at(c)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8i8 {
            write!(f, "{} ", 8 - rank)?;
            for file in 0..8i8 {
                let c = Coord::new(rank, file)
                    .and_then(|c| self.at(c))
                    .map_or('.', Piece::fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces_by_color(Color::White).count(), 16);
        assert_eq!(board.pieces_by_color(Color::Black).count(), 16);
        assert_eq!(
            board.placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );

        let king = board.at(Coord::new(7, 4).unwrap()).unwrap();
        assert_eq!((king.color, king.kind), (Color::White, PieceKind::King));
        let queen = board.at(Coord::new(0, 3).unwrap()).unwrap();
        assert_eq!((queen.color, queen.kind), (Color::Black, PieceKind::Queen));
        assert!(board.pieces().all(|p| !p.has_moved && !p.double_stepped));
        assert!(board.last_moved().is_none());
    }

    #[test]
    fn at_offset_off_board_is_none() {
        let board = Board::standard();
        assert!(board.at_offset(7, 4).is_some());
        assert!(board.at_offset(-1, 4).is_none());
        assert!(board.at_offset(0, 8).is_none());
        assert!(board.at_offset(1000, 1000).is_none());
    }

    #[test]
    fn do_move_walk_sets_flags() {
        let mut board = Board::standard();
        board
            .do_move(sq("e2"), Move::new(MoveKind::DoubleWalk, sq("e4")))
            .unwrap();
        assert!(board.is_empty(sq("e2")));
        let pawn = board.at(sq("e4")).unwrap();
        assert!(pawn.has_moved);
        assert!(pawn.double_stepped);
        assert_eq!(board.last_moved().map(|p| p.coord), Some(sq("e4")));

        board.do_move(sq("e4"), Move::walk(sq("e5"))).unwrap();
        let pawn = board.at(sq("e5")).unwrap();
        assert!(!pawn.double_stepped);
    }

    #[test]
    fn do_move_without_piece_fails() {
        let mut board = Board::standard();
        assert_eq!(
            board.do_move(sq("e4"), Move::walk(sq("e5"))),
            Err(BoardError::NoPieceAt(sq("e4")))
        );
    }

    #[test]
    fn attack_removes_target() {
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        board.do_move(sq("e4"), Move::attack(sq("d5"))).unwrap();
        let pawn = board.at(sq("d5")).unwrap();
        assert_eq!(pawn.color, Color::White);
        assert_eq!(board.pieces_by_color(Color::Black).count(), 1);
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        board
            .do_move(sq("e5"), Move::new(MoveKind::EnPassant, sq("d6")))
            .unwrap();
        assert!(board.is_empty(sq("d5")));
        assert!(board.at(sq("d6")).is_some());
        assert_eq!(board.pieces_by_color(Color::Black).count(), 1);
    }

    #[test]
    fn castling_moves_rook() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        board
            .do_move(sq("e1"), Move::new(MoveKind::ShortCastle, sq("g1")))
            .unwrap();
        assert_eq!(board.at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(board.at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(board.is_empty(sq("h1")));
        assert!(board.at(sq("f1")).unwrap().has_moved);

        board
            .do_move(sq("e8"), Move::new(MoveKind::LongCastle, sq("c8")))
            .unwrap();
        assert_eq!(board.at(sq("c8")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(board.at(sq("d8")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(board.is_empty(sq("a8")));
    }

    #[test]
    fn castling_without_rook_fails() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            board.do_move(sq("e1"), Move::new(MoveKind::ShortCastle, sq("g1"))),
            Err(BoardError::MissingCastlingRook(sq("h1")))
        );
    }

    #[test]
    fn promote_replaces_pawn() {
        let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        board
            .do_move(sq("a7"), Move::new(MoveKind::Promotion, sq("a8")))
            .unwrap();
        assert_eq!(board.at(sq("a8")).map(|p| p.kind), Some(PieceKind::Pawn));
        board.promote(sq("a8"), PieceKind::Queen).unwrap();
        assert_eq!(board.at(sq("a8")).map(|p| p.kind), Some(PieceKind::Queen));

        assert_eq!(
            board.promote(sq("a8"), PieceKind::Rook),
            Err(BoardError::InvalidPromotion(sq("a8"), PieceKind::Rook))
        );
        assert_eq!(
            board.promote(sq("b8"), PieceKind::Rook),
            Err(BoardError::NoPieceAt(sq("b8")))
        );
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::standard();
        let mut copy = original.clone();
        copy.do_move(sq("g1"), Move::walk(sq("f3"))).unwrap();
        copy.destroy(sq("a7"));

        assert_eq!(original, Board::standard());
        assert!(original.at(sq("g1")).is_some());
        assert!(!original.at(sq("g1")).unwrap().has_moved);
        assert!(original.at(sq("a7")).is_some());
    }

    #[test]
    fn from_fen_flags() {
        let board =
            Board::from_fen("r3k2r/pppppppp/8/8/4P3/8/PPPP1PPP/R3K2R b Kq e3 0 1").unwrap();
        assert!(!board.at(sq("e1")).unwrap().has_moved);
        assert!(!board.at(sq("h1")).unwrap().has_moved);
        assert!(board.at(sq("a1")).unwrap().has_moved);
        assert!(!board.at(sq("e8")).unwrap().has_moved);
        assert!(!board.at(sq("a8")).unwrap().has_moved);
        assert!(board.at(sq("h8")).unwrap().has_moved);

        let pawn = board.at(sq("e4")).unwrap();
        assert!(pawn.double_stepped);
        assert_eq!(board.last_moved().map(|p| p.coord), Some(sq("e4")));
        assert!(!board.at(sq("d2")).unwrap().has_moved);
    }

    #[test]
    fn check_detection() {
        let board = Board::standard();
        assert!(!board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));

        let board = Board::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert!(board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));

        // A pawn attacks diagonally, never straight ahead.
        let board = Board::from_fen("4k3/8/8/8/8/4p3/8/4K3 w - - 0 1").unwrap();
        assert!(!board.is_in_check(Color::White));
        let board = Board::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
        assert!(board.is_in_check(Color::White));
    }

    #[test]
    fn display_board() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
