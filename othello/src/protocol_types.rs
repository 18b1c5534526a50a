use serde::{Deserialize, Serialize};

use crate::{Board, Color};

/// Request for a bot to do something.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { color: Color },
    /// Request to play a move.
    ///
    /// This is only sent when `color` has at least one legal move, so the
    /// response must be a legal [`Move`](crate::Move) for `color`.
    PlayTurn {
        /// The board, as a list of rows.
        board: Board,
        /// The color the bot plays.
        color: Color,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();
