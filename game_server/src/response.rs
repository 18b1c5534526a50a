use std::fmt::Display;

use othello::{Board, Color, GameMode, GameState};
use serde::{Deserialize, Serialize};

use crate::GameId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// The answer to every request except a download.
///
/// The state fields are `None` when there is no game to describe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    pub message: Option<String>,
    pub game_id: Option<GameId>,
    pub player: Option<Color>,
    pub board: Option<Board>,
    pub finished: Option<bool>,
    pub moves_left: Option<u32>,
    pub game_mode: Option<GameMode>,
}

impl Response {
    pub fn with_state(
        status: Status,
        message: Option<String>,
        game_id: GameId,
        state: &GameState,
    ) -> Self {
        Self {
            status,
            message,
            game_id: Some(game_id),
            player: Some(state.current_player),
            board: Some(state.board.clone()),
            finished: Some(state.finished),
            moves_left: Some(state.moves_left),
            game_mode: Some(state.mode),
        }
    }

    pub fn fail(message: impl Display, game_id: Option<GameId>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.to_string()),
            game_id,
            player: None,
            board: None,
            finished: None,
            moves_left: None,
            game_mode: None,
        }
    }
}
