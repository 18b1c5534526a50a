use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use othello::{
    Color, GameMode, GameState, HeuristicAgent, Move, ParseGameModeError, TurnError, TurnOutcome,
};
use tracing::{debug, info, warn};

use crate::response::{Response, Status};

pub type GameId = u64;

/// The color the heuristic agent plays in AI mode.
pub const AGENT_COLOR: Color = Color::Light;

#[derive(Debug)]
pub enum StoreError {
    UnknownGame { game_id: GameId },
    InvalidMode(ParseGameModeError),
    Turn(TurnError),
    InvalidRecord(serde_json::Error),
}

impl From<TurnError> for StoreError {
    fn from(err: TurnError) -> Self {
        StoreError::Turn(err)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::UnknownGame { .. } => None,
            StoreError::InvalidMode(err) => Some(err),
            StoreError::Turn(err) => Some(err),
            StoreError::InvalidRecord(err) => Some(err),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::UnknownGame { game_id } => write!(f, "No game with id {}.", game_id),
            StoreError::InvalidMode(err) => write!(f, "{}", err),
            StoreError::Turn(err) => write!(f, "{}", err),
            StoreError::InvalidRecord(err) => write!(f, "Invalid game record: {}", err),
        }
    }
}

/// Holds every running game. Each game sits behind its own lock, so
/// requests for different games do not wait for each other.
pub struct GameStore {
    games: Mutex<HashMap<GameId, Arc<Mutex<GameState>>>>,
    next_id: AtomicU64,
    agent: HeuristicAgent,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new(HeuristicAgent::default())
    }
}

// Every update is a single `play` or a full replacement, so a poisoned
// lock still guards a consistent state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn describe(outcome: TurnOutcome) -> Option<String> {
    match outcome {
        TurnOutcome::Normal => None,
        TurnOutcome::Skipped { skipped } => Some(format!("Skipping {}'s turn.", skipped)),
        TurnOutcome::GameEnded { winner: Some(color) } => Some(format!("{} won!", color)),
        TurnOutcome::GameEnded { winner: None } => Some(String::from("Draw.")),
    }
}

impl GameStore {
    pub fn new(agent: HeuristicAgent) -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            agent,
        }
    }

    pub fn num_games(&self) -> usize {
        lock(&self.games).len()
    }

    fn game(&self, game_id: GameId) -> Result<Arc<Mutex<GameState>>, StoreError> {
        lock(&self.games)
            .get(&game_id)
            .cloned()
            .ok_or(StoreError::UnknownGame { game_id })
    }

    fn insert(&self, state: GameState) -> (GameId, Arc<Mutex<GameState>>) {
        let game_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let game = Arc::new(Mutex::new(state));
        lock(&self.games).insert(game_id, Arc::clone(&game));
        (game_id, game)
    }

    /// Starts a game in the mode named by `mode` ("pvp" or "ai").
    pub fn new_game(&self, mode: &str) -> Response {
        let mode = match mode.parse::<GameMode>() {
            Ok(mode) => mode,
            Err(err) => return Response::fail(StoreError::InvalidMode(err), None),
        };
        let (game_id, game) = self.insert(GameState::new(mode));
        info!(game_id, %mode, "New game");
        let state = lock(&game);
        Response::with_state(Status::Success, None, game_id, &state)
    }

    /// Plays at 1-based column `x` and row `y` for the current player.
    ///
    /// In AI mode the agent then answers, and keeps answering for as long as
    /// the person has no legal move.
    pub fn make_move(&self, game_id: GameId, x: i32, y: i32) -> Response {
        let game = match self.game(game_id) {
            Ok(game) => game,
            Err(err) => return Response::fail(err, Some(game_id)),
        };
        let mut state = lock(&game);

        let (Some(row), Some(col)) = (y.checked_sub(1), x.checked_sub(1)) else {
            let message = format!("Coordinates {},{} are outside the board bounds.", x, y);
            return Response::with_state(Status::Fail, Some(message), game_id, &state);
        };
        let mv = Move::new(row, col);
        let outcome = match state.play(mv) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(game_id, %mv, %err, "Rejected move");
                let message = StoreError::from(err).to_string();
                return Response::with_state(Status::Fail, Some(message), game_id, &state);
            }
        };
        debug!(game_id, %mv, ?outcome, "Move");

        let mut message = describe(outcome);
        match self.let_agent_play(game_id, &mut state) {
            Ok(Some(agent_message)) => message = Some(agent_message),
            Ok(None) => {}
            Err(err) => {
                warn!(game_id, %err, "Agent failed to move");
                let message = StoreError::from(err).to_string();
                return Response::with_state(Status::Fail, Some(message), game_id, &state);
            }
        }
        Response::with_state(Status::Success, message, game_id, &state)
    }

    // Returns the message for the last noteworthy outcome, if any.
    fn let_agent_play(
        &self,
        game_id: GameId,
        state: &mut GameState,
    ) -> Result<Option<String>, TurnError> {
        let mut message = None;
        while state.mode == GameMode::Ai && state.current_player == AGENT_COLOR && !state.finished
        {
            let Some(mv) = self.agent.choose_move(&state.board, AGENT_COLOR) else {
                return Err(TurnError::Passed { color: AGENT_COLOR });
            };
            let outcome = state.play(mv)?;
            debug!(game_id, %mv, ?outcome, "Agent move");
            if let Some(text) = describe(outcome) {
                message = Some(text);
            }
        }
        Ok(message)
    }

    /// The saved-game record of a game.
    pub fn download(&self, game_id: GameId) -> Result<GameState, StoreError> {
        let game = self.game(game_id)?;
        let state = lock(&game).clone();
        Ok(state)
    }

    /// Replaces a game with a saved-game record, or starts a new game from
    /// it if no id is given.
    ///
    /// The record is validated completely before anything is replaced.
    pub fn upload(&self, game_id: Option<GameId>, record: serde_json::Value) -> Response {
        let game = match game_id.map(|game_id| self.game(game_id)).transpose() {
            Ok(game) => game,
            Err(err) => return Response::fail(err, game_id),
        };
        let uploaded: GameState = match serde_json::from_value(record) {
            Ok(state) => state,
            Err(err) => {
                warn!(?game_id, %err, "Rejected upload");
                return Response::fail(StoreError::InvalidRecord(err), game_id);
            }
        };

        let (game_id, game) = match (game_id, game) {
            (Some(game_id), Some(game)) => (game_id, game),
            _ => self.insert(GameState::new(uploaded.mode)),
        };
        info!(game_id, "Uploaded game");

        let mut state = lock(&game);
        *state = uploaded;
        let mut message = state.settle().and_then(describe);
        match self.let_agent_play(game_id, &mut state) {
            Ok(Some(agent_message)) => message = Some(agent_message),
            Ok(None) => {}
            Err(err) => {
                let message = StoreError::from(err).to_string();
                return Response::with_state(Status::Fail, Some(message), game_id, &state);
            }
        }
        Response::with_state(Status::Success, message, game_id, &state)
    }

    pub fn close(&self, game_id: GameId) -> Response {
        match lock(&self.games).remove(&game_id) {
            Some(_) => {
                info!(game_id, "Closed game");
                Response {
                    status: Status::Success,
                    message: Some(String::from("Game closed.")),
                    game_id: Some(game_id),
                    player: None,
                    board: None,
                    finished: None,
                    moves_left: None,
                    game_mode: None,
                }
            }
            None => Response::fail(StoreError::UnknownGame { game_id }, Some(game_id)),
        }
    }
}
