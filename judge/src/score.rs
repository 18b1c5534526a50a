use std::collections::HashMap;
use std::fmt;

use crate::GameResult;

/// Tally of one matchup, indexed like the two players.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub wins: [usize; 2],
    /// Games forfeited through an illegal move, per offender.
    pub illegal_moves: [usize; 2],
    pub ties: usize,
}

impl MatchScore {
    pub fn record(&mut self, result: &GameResult) {
        match *result {
            GameResult::WonByPlayer { player_idx } => self.wins[player_idx] += 1,
            GameResult::Tie => self.ties += 1,
            GameResult::IllegalMoveByPlayer { player_idx, .. } => {
                self.wins[1 - player_idx] += 1;
                self.illegal_moves[player_idx] += 1;
            }
        }
    }

    pub fn num_games(&self) -> usize {
        self.wins.iter().sum::<usize>() + self.ties
    }

    /// Win share of each player and the tie share, in percent.
    pub fn percentages(&self) -> Option<[f32; 3]> {
        let total = self.num_games();
        (total > 0).then(|| {
            let [first, second] = self.wins.map(|n| 100.0 * n as f32 / total as f32);
            [first, second, 100.0 * self.ties as f32 / total as f32]
        })
    }

    pub fn report<'a>(&'a self, names: [&'a str; 2]) -> MatchReport<'a> {
        MatchReport { names, score: self }
    }
}

/// The end-of-matchup summary.
pub struct MatchReport<'a> {
    names: [&'a str; 2],
    score: &'a MatchScore,
}

impl fmt::Display for MatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "End result:")?;
        for (idx, name) in self.names.iter().enumerate() {
            write!(f, "- {} wins by {}", self.score.wins[idx], name)?;
            let opponent = 1 - idx;
            let forfeits = self.score.illegal_moves[opponent];
            if forfeits > 0 {
                write!(f, " ({} through illegal moves by {})", forfeits, self.names[opponent])?;
            }
            writeln!(f)?;
        }
        write!(f, "- {} ties", self.score.ties)
    }
}

/// All matchups of a tournament, keyed by the indices into `names`.
pub struct Standings<'a> {
    pub names: Vec<&'a str>,
    pub scores: HashMap<(usize, usize), MatchScore>,
}

const CELL_WIDTH: usize = 19;

impl fmt::Display for Standings<'_> {
    /// One row per first player, one column per second player. Each cell holds
    /// the first player's win %, the second player's win % and the tie %.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat((CELL_WIDTH + 3) * self.names.len());
        writeln!(f, "Tournament results (row win %, column win %, tie %):")?;
        write!(f, "{:w$} |", "", w = CELL_WIDTH)?;
        for name in self.names.iter().skip(1) {
            write!(f, " {:w$} |", name, w = CELL_WIDTH)?;
        }
        writeln!(f)?;

        for (row, name) in self.names.iter().enumerate().take(self.names.len().saturating_sub(1)) {
            writeln!(f, "{}", rule)?;
            write!(f, "{:w$} |", name, w = CELL_WIDTH)?;
            for col in 1..self.names.len() {
                let cell = match self.scores.get(&(row, col)).and_then(MatchScore::percentages) {
                    Some([first, second, ties]) if col > row => {
                        format!("{:5.1} {:5.1} {:5.1}", first, second, ties)
                    }
                    _ if col > row => "N/A".to_string(),
                    _ => String::new(),
                };
                write!(f, " {:>w$} |", cell, w = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", rule)
    }
}
