//! Interactive game session over a line-based reader and writer.

use std::io::{self, BufRead, Write};
use std::thread;

use chess_ai::Searcher;
use chess_core::{Color, Coord, PieceKind};
use chess_engine::{Game, GameError, GameState};
use thiserror::Error;
use tracing::{debug, info};

use crate::command::Command;
use crate::config::Config;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// What came of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Played,
    Retry,
    Quit,
}

/// A game between a human on `reader`/`writer` and the AI, or between two
/// AIs.
pub struct Session<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    game: Game,
    config: Config,
    ai_vs_ai: bool,
    max_plies: Option<u32>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, game: Game, config: Config) -> Self {
        Self {
            reader,
            writer,
            game,
            config,
            ai_vs_ai: false,
            max_plies: None,
        }
    }

    /// Lets the AI play both sides.
    pub fn ai_vs_ai(mut self, enabled: bool) -> Self {
        self.ai_vs_ai = enabled;
        self
    }

    /// Stops the session after the given number of plies.
    pub fn max_plies(mut self, plies: Option<u32>) -> Self {
        self.max_plies = plies;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game ends, the ply limit is hit, or the human quits.
    pub fn run(&mut self) -> Result<(), SessionError> {
        let mut plies = 0u32;
        self.print_board()?;

        while !self.game.state().is_over() {
            if self.max_plies.is_some_and(|max| plies >= max) {
                writeln!(self.writer, "Stopped after {} plies.", plies)?;
                return Ok(());
            }

            let turn = if self.is_ai_turn() {
                self.ai_turn()?
            } else {
                self.human_turn()?
            };

            match turn {
                Turn::Played => {
                    plies += 1;
                    self.print_board()?;
                    if self.game.state() == GameState::Running && self.game.is_check() {
                        writeln!(self.writer, "Check!")?;
                    }
                }
                Turn::Retry => {}
                Turn::Quit => return Ok(()),
            }
        }

        self.report()
    }

    fn is_ai_turn(&self) -> bool {
        self.ai_vs_ai || self.game.turn() == self.config.ai.ai_color()
    }

    fn ai_turn(&mut self) -> Result<Turn, SessionError> {
        let color = self.game.turn();
        let mut searcher = Searcher::new(color, self.config.ai.depth());

        let delay = self.config.think_delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        let Some(best) = searcher.get_best_move(self.game.board()) else {
            writeln!(self.writer, "{} has no legal move.", color)?;
            return Ok(Turn::Quit);
        };
        self.game.play_move(best.piece, best.mv)?;
        if let GameState::AwaitingPromotion(_) = self.game.state() {
            self.game.promote(PieceKind::Queen)?;
        }

        info!(
            color = %color,
            from = %best.piece,
            to = %best.mv.to,
            score = best.score,
            nodes = searcher.nodes(),
            "AI move"
        );
        writeln!(
            self.writer,
            "{} plays {}{} ({})",
            color, best.piece, best.mv.to, best.mv
        )?;
        Ok(Turn::Played)
    }

    fn human_turn(&mut self) -> Result<Turn, SessionError> {
        write!(self.writer, "{} to move> ", self.game.turn())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Turn::Quit);
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.writer, "{}", e)?;
                return Ok(Turn::Retry);
            }
        };

        match command {
            Command::Quit => Ok(Turn::Quit),
            Command::Moves => {
                let moves: Vec<String> = self
                    .game
                    .legal_moves()
                    .iter()
                    .map(|(from, mv)| format!("{}{}", from, mv.to))
                    .collect();
                writeln!(self.writer, "{}", moves.join(" "))?;
                Ok(Turn::Retry)
            }
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let plain_move = self
                    .game
                    .legal_moves_from(from)
                    .iter()
                    .any(|mv| mv.to == to && !mv.kind.is_promotion());
                if promotion.is_some() && plain_move {
                    writeln!(self.writer, "{}{} is not a promotion", from, to)?;
                    return Ok(Turn::Retry);
                }
                self.play_human_move(from, to, promotion)
            }
        }
    }

    fn play_human_move(
        &mut self,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<Turn, SessionError> {
        match self.game.play(from, to) {
            Ok(mv) => {
                debug!(from = %from, mv = %mv, "human move");
                if let GameState::AwaitingPromotion(_) = self.game.state() {
                    self.game.promote(promotion.unwrap_or(PieceKind::Queen))?;
                }
                Ok(Turn::Played)
            }
            Err(e) => {
                writeln!(self.writer, "{}", e)?;
                Ok(Turn::Retry)
            }
        }
    }

    fn print_board(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.game.board())?;
        writeln!(self.writer)
    }

    fn report(&mut self) -> Result<(), SessionError> {
        let state = self.game.state();
        match state.winner() {
            Some(Color::White) => writeln!(self.writer, "Checkmate. White wins.")?,
            Some(Color::Black) => writeln!(self.writer, "Checkmate. Black wins.")?,
            None if state == GameState::Stalemate => writeln!(self.writer, "Stalemate.")?,
            None => {}
        }
        info!(state = ?state, round = self.game.round(), "game finished");
        Ok(())
    }
}
