use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Agent, Board, Color, IllegalMove, Move};

pub const BOARD_SIZE: usize = 8;
/// The most moves that are played in one game, by both players together.
pub const MAX_MOVES: u32 = 60;
pub const STARTING_COLOR: Color = Color::Dark;

/// Whether both colors are played by people, or Light by the heuristic agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Pvp,
    Ai,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseGameModeError;

impl std::error::Error for ParseGameModeError {}

impl std::fmt::Display for ParseGameModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game mode invalid.")
    }
}

impl FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pvp" => Ok(GameMode::Pvp),
            "ai" => Ok(GameMode::Ai),
            _ => Err(ParseGameModeError),
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Pvp => write!(f, "pvp"),
            GameMode::Ai => write!(f, "ai"),
        }
    }
}

/// Everything needed to resume a game.
///
/// The JSON field names match the saved-game files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameState {
    pub board: Board,
    #[serde(rename = "current_player_colour")]
    pub current_player: Color,
    pub moves_left: u32,
    #[serde(rename = "game_finished")]
    pub finished: bool,
    #[serde(rename = "game_mode")]
    pub mode: GameMode,
}

/// Summarizes the outcome of playing a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The other color is up next.
    Normal,
    /// This color had no legal move, so the same color is up again.
    Skipped { skipped: Color },
    GameEnded { winner: Option<Color> },
}

/// The error type for one turn. The game state is unchanged when this is returned.
#[derive(Debug, PartialEq, Eq)]
pub enum TurnError {
    GameFinished,
    IllegalMove(IllegalMove),
    /// The player did not pick a move although one was available.
    Passed { color: Color },
}

impl From<IllegalMove> for TurnError {
    fn from(err: IllegalMove) -> Self {
        TurnError::IllegalMove(err)
    }
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for TurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnError::GameFinished => write!(f, "Game finished."),
            TurnError::IllegalMove(err) => write!(f, "{}", err),
            TurnError::Passed { color } => {
                write!(f, "{} passed, but had a legal move", color)
            }
        }
    }
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(BOARD_SIZE).expect("BOARD_SIZE is even and nonzero"),
            current_player: STARTING_COLOR,
            moves_left: MAX_MOVES,
            finished: false,
            mode,
        }
    }

    /// Plays a move for the current player and hands the turn over.
    ///
    /// If the opponent then has no legal move, the current player moves again.
    /// The game ends when the move budget is used up or neither color can move.
    pub fn play(&mut self, mv: Move) -> Result<TurnOutcome, TurnError> {
        if self.finished {
            return Err(TurnError::GameFinished);
        }
        let mover = self.current_player;
        self.board.apply_move(mv, mover)?;
        self.moves_left = self.moves_left.saturating_sub(1);

        let opponent = !mover;
        let opponent_can_move = self.board.can_move(opponent);
        if opponent_can_move {
            self.current_player = opponent;
        }
        if self.moves_left == 0 || (!opponent_can_move && !self.board.can_move(mover)) {
            return Ok(self.finish());
        }
        if opponent_can_move {
            Ok(TurnOutcome::Normal)
        } else {
            Ok(TurnOutcome::Skipped { skipped: opponent })
        }
    }

    /// Brings a state that was set up from outside, e.g. loaded from a file,
    /// into a playable shape: ends it if nobody can move any more, or passes
    /// the turn if only the current player is stuck.
    ///
    /// Returns `None` if nothing had to be done.
    pub fn settle(&mut self) -> Option<TurnOutcome> {
        if self.finished {
            return None;
        }
        let current = self.current_player;
        if self.board.can_move(current) {
            if self.moves_left == 0 {
                return Some(self.finish());
            }
            return None;
        }
        if self.moves_left > 0 && self.board.can_move(!current) {
            self.current_player = !current;
            Some(TurnOutcome::Skipped { skipped: current })
        } else {
            Some(self.finish())
        }
    }

    fn finish(&mut self) -> TurnOutcome {
        self.finished = true;
        TurnOutcome::GameEnded {
            winner: self.board.winner(),
        }
    }
}

/// Lets two agents play a complete game against each other.
pub fn play_game<'a>(
    dark: &'a mut dyn Agent,
    light: &'a mut dyn Agent,
) -> Result<GameState, TurnError> {
    let mut state = GameState::new(GameMode::Ai);
    while !state.finished {
        let color = state.current_player;
        let agent = match color {
            Color::Dark => &mut *dark,
            Color::Light => &mut *light,
        };
        let Some(mv) = agent.select_move(&state.board, color) else {
            return Err(TurnError::Passed { color });
        };
        state.play(mv)?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{HeuristicAgent, RandomAgent};

    fn parse_rows(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn new_game_defaults() {
        for mode in [GameMode::Pvp, GameMode::Ai] {
            let state = GameState::new(mode);
            assert_eq!(state.board, Board::new(BOARD_SIZE).unwrap());
            assert_eq!(state.current_player, STARTING_COLOR);
            assert_eq!(state.moves_left, MAX_MOVES);
            assert!(!state.finished);
            assert_eq!(state.mode, mode);
        }
    }

    #[test]
    fn parse_game_mode() {
        assert_eq!("PvP".parse::<GameMode>(), Ok(GameMode::Pvp));
        assert_eq!(" ai\n".parse::<GameMode>(), Ok(GameMode::Ai));
        assert_eq!("AI".parse::<GameMode>(), Ok(GameMode::Ai));
        assert_eq!("chess".parse::<GameMode>(), Err(ParseGameModeError));
    }

    #[test]
    fn turns_alternate() {
        let mut state = GameState::new(GameMode::Pvp);
        assert_eq!(state.play(Move::new(2, 3)), Ok(TurnOutcome::Normal));
        assert_eq!(state.current_player, Color::Light);
        assert_eq!(state.moves_left, MAX_MOVES - 1);
    }

    #[test]
    fn illegal_move_changes_nothing() {
        let mut state = GameState::new(GameMode::Pvp);
        let before = state.clone();
        assert_eq!(
            state.play(Move::new(0, 0)),
            Err(TurnError::IllegalMove(IllegalMove::NoCapture {
                mv: Move::new(0, 0)
            }))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn stuck_opponent_is_skipped() {
        let mut state = GameState::new(GameMode::Pvp);
        state.board = parse_rows(&[
            ".LD.....", //
            "........", //
            "........", //
            "........", //
            "........", //
            "......LD", //
            "........", //
            "........",
        ]);
        assert_eq!(
            state.play(Move::new(0, 0)),
            Ok(TurnOutcome::Skipped {
                skipped: Color::Light
            })
        );
        assert_eq!(state.current_player, Color::Dark);
        assert_eq!(
            state.play(Move::new(5, 5)),
            Ok(TurnOutcome::GameEnded {
                winner: Some(Color::Dark)
            })
        );
        assert!(state.finished);
        assert_eq!(state.play(Move::new(1, 1)), Err(TurnError::GameFinished));
    }

    #[test]
    fn move_budget_ends_the_game() {
        let mut state = GameState::new(GameMode::Pvp);
        state.moves_left = 1;
        assert_eq!(
            state.play(Move::new(2, 3)),
            Ok(TurnOutcome::GameEnded {
                winner: Some(Color::Dark)
            })
        );
        assert_eq!(state.moves_left, 0);
        assert!(state.finished);
    }

    #[test]
    fn settle_loaded_states() {
        let mut state = GameState::new(GameMode::Pvp);
        assert_eq!(state.settle(), None);

        // Light is to move, but its only disc is stuck against the edge.
        state.board = parse_rows(&[
            "DL......", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........",
        ]);
        state.current_player = Color::Light;
        assert_eq!(
            state.settle(),
            Some(TurnOutcome::Skipped {
                skipped: Color::Light
            })
        );
        assert_eq!(state.current_player, Color::Dark);

        state.board = Board::filled(BOARD_SIZE, Color::Light).unwrap();
        assert_eq!(
            state.settle(),
            Some(TurnOutcome::GameEnded {
                winner: Some(Color::Light)
            })
        );
        assert!(state.finished);
        assert_eq!(state.settle(), None);
    }

    #[test]
    fn saved_game_format() {
        let mut state = GameState::new(GameMode::Ai);
        state.moves_left = 12;
        let json = serde_json::to_value(&state).unwrap();
        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "board",
                "current_player_colour",
                "game_finished",
                "game_mode",
                "moves_left"
            ]
        );
        assert_eq!(object["current_player_colour"], "Dark");
        assert_eq!(object["game_mode"], "ai");
        assert_eq!(object["board"][3][3], "Light");
        assert!(object["board"][0][0].is_null());

        let parsed: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn saved_game_is_validated() {
        let mut json = serde_json::to_value(GameState::new(GameMode::Pvp)).unwrap();
        json["__class__"] = serde_json::Value::from("GameState");
        assert!(serde_json::from_value::<GameState>(json).is_err());

        let mut json = serde_json::to_value(GameState::new(GameMode::Pvp)).unwrap();
        json.as_object_mut().unwrap().remove("moves_left");
        assert!(serde_json::from_value::<GameState>(json).is_err());

        let mut json = serde_json::to_value(GameState::new(GameMode::Pvp)).unwrap();
        json["current_player_colour"] = serde_json::Value::from("Purple");
        assert!(serde_json::from_value::<GameState>(json).is_err());
    }

    #[test]
    fn heuristic_self_play() {
        let state = play_game(&mut HeuristicAgent::default(), &mut HeuristicAgent::default())
            .unwrap();
        assert!(state.finished);
        assert_eq!(state.moves_left, 0);
        assert_eq!(
            state.board,
            parse_rows(&[
                "LDDDDDDD", //
                "LDDLDDDD", //
                "LDLDDDDD", //
                "LDDLDDLD", //
                "LDLDDDLD", //
                "LDDDLLLD", //
                "LDDLLLLD", //
                "LLLLLLLL",
            ])
        );
        let counts = state.board.count_by_color();
        assert_eq!((counts.dark, counts.light), (36, 28));
        assert_eq!(state.board.winner(), Some(Color::Dark));
    }

    #[test]
    fn heuristic_beats_random_play() {
        let mut rng = StdRng::seed_from_u64(0x07e1_1000);
        let games = 150;
        let mut wins = 0;
        for _ in 0..games {
            let mut random = RandomAgent::new(&mut rng);
            let state = play_game(&mut random, &mut HeuristicAgent::default()).unwrap();
            if state.board.winner() == Some(Color::Light) {
                wins += 1;
            }
        }
        let win_rate = wins as f64 / games as f64;
        assert!(win_rate >= 0.7, "won only {} of {} games", wins, games);
    }
}
