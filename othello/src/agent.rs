mod heuristic;
mod zone;

use rand::seq::SliceRandom;
use rand::Rng;

pub use heuristic::*;
pub use zone::*;

use crate::{Board, Color, Move};

/// Anything that can pick a move for one side of a game.
pub trait Agent {
    /// Returns a legal move for `color`, or `None` if there is none.
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move>;
}

impl Agent for HeuristicAgent {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.choose_move(board, color)
    }
}

/// Plays a uniformly random legal move.
pub struct RandomAgent<R> {
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        board.legal_moves(color).choose(&mut self.rng).copied()
    }
}
