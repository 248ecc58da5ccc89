//! Turn-based game session.
//!
//! The [`Game`] struct drives a board through a game:
//! - side to move and the round counter
//! - the legal moves of the side to move, computed once per turn
//! - pending promotion choices
//! - checkmate and stalemate detection

use chess_core::{Castling, Color, Coord, Fen, FenError, Move, PieceKind};
use thiserror::Error;
use tracing::debug;

use crate::legality::all_legal_moves;
use crate::{Board, BoardError};

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,

    /// A promotion choice must be made before play continues.
    #[error("a promotion choice is pending at {0}")]
    PromotionPending(Coord),

    /// [`Game::promote`] was called without a pending promotion.
    #[error("no promotion is pending")]
    NoPromotionPending,

    /// The coordinate does not hold a piece of the side to move.
    #[error("no {0} piece at {1}")]
    NotYourPiece(Color, Coord),

    /// The move is not among the legal moves of the piece.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Coord, to: Coord },

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Fen(#[from] FenError),
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the side to move.
    Running,
    /// A pawn reached the farthest rank at the given coordinate and waits
    /// for [`Game::promote`].
    AwaitingPromotion(Coord),
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameState {
    /// Returns true once the game has been decided.
    pub const fn is_over(self) -> bool {
        matches!(
            self,
            GameState::WhiteWins | GameState::BlackWins | GameState::Stalemate
        )
    }

    /// Returns the winner of a decided game.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameState::WhiteWins => Some(Color::White),
            GameState::BlackWins => Some(Color::Black),
            _ => None,
        }
    }
}

/// A game of chess between two sides taking turns on one board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    /// Starts at 1 and advances each time White is to move again.
    round: u32,
    /// Plies since the last pawn move or capture.
    halfmove_clock: u32,
    state: GameState,
    /// Legal moves of the side to move.
    moves: Vec<(Coord, Move)>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting layout, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White, 1, 0)
    }

    /// Creates a game from a board and the side to move.
    ///
    /// The position is checked right away, so a game can start already
    /// decided.
    pub fn from_board(board: Board, turn: Color, round: u32, halfmove_clock: u32) -> Self {
        let mut game = Game {
            board,
            turn,
            round: round.max(1),
            halfmove_clock,
            state: GameState::Running,
            moves: Vec::new(),
        };
        game.start_turn();
        game
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let fen = Fen::parse(fen)?;
        Ok(Self::from_board(
            Board::from_parsed(&fen),
            fen.active,
            fen.fullmove_number,
            fen.halfmove_clock,
        ))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the current round, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Returns the game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.turn)
    }

    /// Returns every legal move of the side to move.
    pub fn legal_moves(&self) -> &[(Coord, Move)] {
        &self.moves
    }

    /// Returns the legal moves of the piece at `from`.
    pub fn legal_moves_from(&self, from: Coord) -> Vec<Move> {
        self.moves
            .iter()
            .filter(|(at, _)| *at == from)
            .map(|&(_, mv)| mv)
            .collect()
    }

    /// Moves the piece at `from` to `to`, choosing the legal move that lands
    /// there.
    ///
    /// Returns the move played. A promotion move leaves the game in
    /// [`GameState::AwaitingPromotion`].
    pub fn play(&mut self, from: Coord, to: Coord) -> Result<Move, GameError> {
        self.ensure_running()?;
        self.ensure_own_piece(from)?;
        let mv = self
            .moves
            .iter()
            .find(|(at, mv)| *at == from && mv.to == to)
            .map(|&(_, mv)| mv)
            .ok_or(GameError::IllegalMove { from, to })?;
        self.apply(from, mv)?;
        Ok(mv)
    }

    /// Plays an explicit move for the piece at `from`.
    pub fn play_move(&mut self, from: Coord, mv: Move) -> Result<(), GameError> {
        self.ensure_running()?;
        self.ensure_own_piece(from)?;
        if !self.moves.contains(&(from, mv)) {
            return Err(GameError::IllegalMove { from, to: mv.to });
        }
        self.apply(from, mv)
    }

    /// Completes a pending promotion.
    pub fn promote(&mut self, kind: PieceKind) -> Result<(), GameError> {
        let GameState::AwaitingPromotion(at) = self.state else {
            return Err(GameError::NoPromotionPending);
        };
        self.board.promote(at, kind)?;
        debug!(square = %at, piece = %kind, "pawn promoted");
        self.state = GameState::Running;
        self.end_turn();
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.state {
            GameState::Running => Ok(()),
            GameState::AwaitingPromotion(at) => Err(GameError::PromotionPending(at)),
            _ => Err(GameError::GameOver),
        }
    }

    fn ensure_own_piece(&self, from: Coord) -> Result<(), GameError> {
        match self.board.at(from) {
            Some(piece) if piece.color == self.turn => Ok(()),
            _ => Err(GameError::NotYourPiece(self.turn, from)),
        }
    }

    fn apply(&mut self, from: Coord, mv: Move) -> Result<(), GameError> {
        let resets_clock = mv.kind.is_capture()
            || self
                .board
                .at(from)
                .is_some_and(|piece| piece.kind == PieceKind::Pawn);
        self.board.do_move(from, mv)?;
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        debug!(color = %self.turn, from = %from, mv = %mv, "move played");

        if mv.kind.is_promotion() {
            self.state = GameState::AwaitingPromotion(mv.to);
            debug!(square = %mv.to, "awaiting promotion choice");
        } else {
            self.end_turn();
        }
        Ok(())
    }

    fn end_turn(&mut self) {
        self.turn = self.turn.opposite();
        if self.turn == Color::White {
            self.round += 1;
        }
        self.start_turn();
    }

    fn start_turn(&mut self) {
        self.moves = all_legal_moves(&self.board, self.turn);
        self.state = if !self.moves.is_empty() {
            GameState::Running
        } else if self.board.is_in_check(self.turn) {
            match self.turn {
                Color::White => GameState::BlackWins,
                Color::Black => GameState::WhiteWins,
            }
        } else {
            GameState::Stalemate
        };
        if self.state.is_over() {
            debug!(state = ?self.state, round = self.round, "game over");
        }
    }

    /// Serializes the game as a FEN string.
    pub fn to_fen(&self) -> String {
        let castling = self.castling();
        let mut rights = String::new();
        for (allowed, c) in [
            (castling.white_short, 'K'),
            (castling.white_long, 'Q'),
            (castling.black_short, 'k'),
            (castling.black_long, 'q'),
        ] {
            if allowed {
                rights.push(c);
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }

        let en_passant = self
            .board
            .last_moved()
            .filter(|piece| piece.kind == PieceKind::Pawn && piece.double_stepped)
            .and_then(|pawn| pawn.coord.offset(-pawn.color.forward(), 0))
            .map_or_else(|| "-".to_string(), |c| c.to_algebraic());

        format!(
            "{} {} {} {} {} {}",
            self.board.placement(),
            match self.turn {
                Color::White => 'w',
                Color::Black => 'b',
            },
            rights,
            en_passant,
            self.halfmove_clock,
            self.round
        )
    }

    /// Castling availability: unmoved king and rook on their home squares.
    fn castling(&self) -> Castling {
        let unmoved = |color: Color, file: u8, kind: PieceKind| {
            Coord::new(color.home_rank() as i8, file as i8)
                .and_then(|c| self.board.at(c))
                .is_some_and(|p| p.color == color && p.kind == kind && !p.has_moved)
        };
        let side = |color: Color, rook_file: u8| {
            unmoved(color, 4, PieceKind::King) && unmoved(color, rook_file, PieceKind::Rook)
        };
        Castling {
            white_short: side(Color::White, 7),
            white_long: side(Color::White, 0),
            black_short: side(Color::Black, 7),
            black_long: side(Color::Black, 0),
        }
    }
}
