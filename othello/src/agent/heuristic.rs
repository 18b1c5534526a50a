use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::zone::{ZoneCounts, ZoneTally};
use crate::{Board, Color, Move};

/// Boards up to this size are copied once per candidate move. Bigger boards
/// share one scratch copy and undo each candidate after scoring it.
const COPY_PER_CANDIDATE_MAX_SIZE: usize = 8;

/// Points per disc of the scored color in each zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneWeights {
    pub corner: i32,
    pub edge: i32,
    pub corner_adjacent: i32,
    pub edge_adjacent: i32,
    pub corner_adjacent_adjacent: i32,
    pub edge_adjacent_adjacent: i32,
}

impl Default for ZoneWeights {
    fn default() -> Self {
        Self {
            corner: 30,
            edge: 15,
            corner_adjacent: -20,
            edge_adjacent: -10,
            corner_adjacent_adjacent: 6,
            edge_adjacent_adjacent: 1,
        }
    }
}

impl ZoneWeights {
    /// Arithmetic saturates, so weights loaded from a file cannot overflow.
    pub fn apply(&self, counts: &ZoneCounts) -> i32 {
        [
            (counts.corner, self.corner),
            (counts.edge, self.edge),
            (counts.corner_adjacent, self.corner_adjacent),
            (counts.edge_adjacent, self.edge_adjacent),
            (counts.corner_adjacent_adjacent, self.corner_adjacent_adjacent),
            (counts.edge_adjacent_adjacent, self.edge_adjacent_adjacent),
        ]
        .into_iter()
        .fold(0i32, |total, (count, weight)| {
            let count = i32::try_from(count).unwrap_or(i32::MAX);
            total.saturating_add(count.saturating_mul(weight))
        })
    }
}

/// Scores for the number of moves available to each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MobilityScores {
    /// Neither side can move.
    pub saturated: i32,
    /// Only the opponent can move.
    pub locked_out: i32,
    /// Only the scored color can move.
    pub opponent_locked_out: i32,
    /// Lower bound for the move difference when both sides can move.
    pub floor: i32,
}

impl Default for MobilityScores {
    fn default() -> Self {
        Self {
            saturated: -5,
            locked_out: -10,
            opponent_locked_out: 15,
            floor: 10,
        }
    }
}

impl MobilityScores {
    pub fn apply(&self, own_moves: usize, opponent_moves: usize) -> i32 {
        match (own_moves, opponent_moves) {
            (0, 0) => self.saturated,
            (0, _) => self.locked_out,
            (_, 0) => self.opponent_locked_out,
            (own, opponent) => {
                let difference = i32::try_from(own)
                    .unwrap_or(i32::MAX)
                    .saturating_sub(i32::try_from(opponent).unwrap_or(i32::MAX));
                difference.max(self.floor)
            }
        }
    }
}

/// The tunable constants of the [`HeuristicAgent`].
///
/// The defaults are the tuned values. When loaded from JSON, missing fields
/// keep their default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicConfig {
    pub weights: ZoneWeights,
    pub mobility: MobilityScores,
}

impl HeuristicConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open heuristic config '{}'", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse heuristic config '{}'", path.display()))?;
        Ok(config)
    }
}

/// Picks the move whose resulting position scores best, looking one ply ahead.
#[derive(Clone, Debug, Default)]
pub struct HeuristicAgent {
    pub config: HeuristicConfig,
}

impl HeuristicAgent {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    /// Evaluates a position from the point of view of `color`.
    ///
    /// Scores are only meaningful relative to each other.
    pub fn score(&self, board: &Board, color: Color) -> i32 {
        let own_moves = board.legal_moves(color).len();
        let opponent_moves = board.legal_moves(!color).len();
        let mobility = self.config.mobility.apply(own_moves, opponent_moves);

        // Only our own discs count towards the positional score.
        let tally = ZoneTally::of(board);
        let positional = self.config.weights.apply(tally.get(color));

        mobility.saturating_add(positional)
    }

    /// Returns the legal move with the highest score after playing it, or
    /// `None` if `color` cannot move.
    ///
    /// On a tie, the earliest move in row-major order wins. The given board
    /// is never modified.
    pub fn choose_move(&self, board: &Board, color: Color) -> Option<Move> {
        let candidates = board.legal_moves(color);
        let best = if board.size() <= COPY_PER_CANDIDATE_MAX_SIZE {
            self.best_by_copying(board, color, &candidates)
        } else {
            self.best_by_undoing(board, color, &candidates)
        };
        if let Some((mv, score)) = best {
            debug!(%color, %mv, score, "Chose move");
        }
        best.map(|(mv, _)| mv)
    }

    fn best_by_copying(
        &self,
        board: &Board,
        color: Color,
        candidates: &[Move],
    ) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;
        for &mv in candidates {
            let Ok(calculation) = board.calculate(mv, color) else {
                continue;
            };
            let score = self.score(&calculation.execute(), color);
            trace!(%mv, score, "Scored candidate");
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }
        best
    }

    fn best_by_undoing(
        &self,
        board: &Board,
        color: Color,
        candidates: &[Move],
    ) -> Option<(Move, i32)> {
        let mut scratch = board.clone();
        let mut best: Option<(Move, i32)> = None;
        for &mv in candidates {
            let Ok(placement) = scratch.apply_move(mv, color) else {
                continue;
            };
            let score = self.score(&scratch, color);
            scratch.undo(&placement);
            trace!(%mv, score, "Scored candidate");
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }
        best
    }
}
