//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! Every node works on its own copy of the board, so sibling branches share
//! no state. The root considers only fully legal moves; deeper nodes only
//! drop moves that leave the mover in check.

use chess_core::{Color, Coord, Move, PieceKind};
use chess_engine::legality::{all_legal_moves, check_filtered_moves};
use chess_engine::Board;
use tracing::{debug, trace};

use crate::{AiConfig, Evaluator};

/// The move chosen by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    /// Coordinate of the piece to move.
    pub piece: Coord,
    pub mv: Move,
    /// Minimax score of the move, from the AI's point of view.
    pub score: i32,
}

/// Search state
#[derive(Debug, Clone)]
pub struct Searcher {
    color: Color,
    depth: u32,
    pruning: bool,
    nodes: u64,
    evaluator: Evaluator,
}

impl Searcher {
    /// Creates a searcher playing `color` to the given depth in plies.
    pub fn new(color: Color, depth: u32) -> Self {
        Searcher {
            color,
            depth,
            pruning: true,
            nodes: 0,
            evaluator: Evaluator::new(color),
        }
    }

    /// Creates a searcher for the AI side of a game configuration.
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.ai_color(), config.depth())
    }

    /// Disables alpha-beta cutoffs, turning the search into plain minimax.
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the number of nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks the best move for the AI's color.
    ///
    /// Returns `None` when the AI has no legal move; the caller tells
    /// checkmate from stalemate by asking whether the AI is in check.
    /// Among equally scored moves the first one found wins.
    pub fn get_best_move(&mut self, board: &Board) -> Option<BestMove> {
        self.nodes = 0;
        let mut best: Option<BestMove> = None;

        for (piece, mv) in all_legal_moves(board, self.color) {
            let Some(child) = apply(board, piece, mv) else {
                continue;
            };
            let score = self.minimax(
                &child,
                self.depth.saturating_sub(1),
                i32::MIN,
                i32::MAX,
                false,
            );
            trace!(from = %piece, mv = %mv, score, "root move");

            if best.map_or(true, |b| score > b.score) {
                best = Some(BestMove { piece, mv, score });
            }
        }

        match &best {
            Some(b) => debug!(
                color = %self.color,
                depth = self.depth,
                from = %b.piece,
                mv = %b.mv,
                score = b.score,
                nodes = self.nodes,
                "search finished"
            ),
            None => debug!(color = %self.color, "no legal move"),
        }
        best
    }

    /// Scores `board` by searching `depth` plies ahead.
    ///
    /// The maximizing side is the AI's color. A side without legal moves is
    /// scored by static evaluation like a leaf.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return self.evaluator.evaluate(board);
        }

        let side = if maximizing {
            self.color
        } else {
            self.color.opposite()
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        let mut expanded = false;

        'pieces: for piece in board.pieces_by_color(side) {
            for mv in check_filtered_moves(board, piece.coord) {
                let Some(child) = apply(board, piece.coord, mv) else {
                    continue;
                };
                expanded = true;
                let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing);

                if maximizing {
                    best = best.max(score);
                    alpha = alpha.max(best);
                } else {
                    best = best.min(score);
                    beta = beta.min(best);
                }
                if self.pruning && beta <= alpha {
                    break 'pieces;
                }
            }
        }

        if expanded {
            best
        } else {
            self.evaluator.evaluate(board)
        }
    }
}

/// Plays a move on a copy of the board. Pawns reaching the last rank become
/// queens.
fn apply(board: &Board, from: Coord, mv: Move) -> Option<Board> {
    let mut child = board.clone();
    child.do_move(from, mv).ok()?;
    if mv.kind.is_promotion() {
        child.promote(mv.to, PieceKind::Queen).ok()?;
    }
    Some(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::MoveKind;

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    #[test]
    fn no_move_when_mated() {
        let board = Board::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let mut searcher = Searcher::new(Color::Black, 2);
        assert_eq!(searcher.get_best_move(&board), None);
        assert!(board.is_in_check(Color::Black));
    }

    #[test]
    fn takes_hanging_queen() {
        let board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let mut searcher = Searcher::new(Color::White, 1);
        let best = searcher.get_best_move(&board).unwrap();
        assert_eq!(best.piece, sq("d1"));
        assert_eq!(best.mv, Move::attack(sq("d5")));
    }

    #[test]
    fn promotes_to_queen() {
        let board = Board::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mut searcher = Searcher::new(Color::White, 1);
        let best = searcher.get_best_move(&board).unwrap();
        assert_eq!(best.piece, sq("a7"));
        assert_eq!(best.mv.kind, MoveKind::Promotion);
    }

    #[test]
    fn depth_zero_scores_the_move_itself() {
        let board = Board::standard();
        let mut searcher = Searcher::new(Color::White, 0);
        assert!(searcher.get_best_move(&board).is_some());
        assert_eq!(searcher.nodes(), 20);
    }

    #[test]
    fn from_config_plays_the_ai_color() {
        let searcher = Searcher::from_config(&AiConfig::default());
        assert_eq!(searcher.color(), Color::Black);
        assert_eq!(searcher.depth(), 3);
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let board = Board::standard();
        let mut pruned = Searcher::new(Color::White, 2);
        let mut full = Searcher::new(Color::White, 2).without_pruning();
        let a = pruned.get_best_move(&board);
        let b = full.get_best_move(&board);
        assert_eq!(a, b);
        assert!(pruned.nodes() <= full.nodes());
    }
}
