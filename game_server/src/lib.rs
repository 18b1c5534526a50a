//! Runs many Othello games at once, driven by JSON requests.
//!
//! Each line of input is one [`ServerRequest`], each line of output the
//! matching [`Reply`].

use std::io::{BufRead, Write};

use othello::GameState;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

mod response;
mod store;
pub use response::*;
pub use store::*;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerRequest {
    NewGame {
        game_mode: String,
    },
    /// `x` is the 1-based column, `y` the 1-based row.
    Move {
        game_id: GameId,
        x: i32,
        y: i32,
    },
    Download {
        game_id: GameId,
    },
    /// Without a `game_id`, the record is started as a new game.
    Upload {
        #[serde(default)]
        game_id: Option<GameId>,
        game: serde_json::Value,
    },
    Close {
        game_id: GameId,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// The saved-game record, as it would be written to a file.
    Record(GameState),
    Response(Response),
}

pub fn handle(store: &GameStore, request: ServerRequest) -> Reply {
    let response = match request {
        ServerRequest::NewGame { game_mode } => store.new_game(&game_mode),
        ServerRequest::Move { game_id, x, y } => store.make_move(game_id, x, y),
        ServerRequest::Download { game_id } => match store.download(game_id) {
            Ok(state) => return Reply::Record(state),
            Err(err) => Response::fail(err, Some(game_id)),
        },
        ServerRequest::Upload { game_id, game } => store.upload(game_id, game),
        ServerRequest::Close { game_id } => store.close(game_id),
    };
    Reply::Response(response)
}

/// Answers requests, one JSON object per line, until the end of input.
///
/// Malformed requests are answered with a failure and do not stop the loop.
pub fn serve(store: &GameStore, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        trace!(request = %line, "Received request");

        let reply = match serde_json::from_str::<ServerRequest>(&line) {
            Ok(request) => handle(store, request),
            Err(err) => {
                warn!(%err, "Malformed request");
                Reply::Response(Response::fail(format!("Invalid request: {}", err), None))
            }
        };
        serde_json::to_writer(&mut output, &reply)?;
        writeln!(output)?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use othello::{Color, GameMode, MAX_MOVES};
    use serde_json::{json, Value};

    use super::*;

    fn run(store: &GameStore, requests: &[Value]) -> Vec<Value> {
        let input: String = requests.iter().map(|req| format!("{}\n", req)).collect();
        let mut output = Vec::new();
        serve(store, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn one_reply_per_request() {
        let store = GameStore::default();
        let replies = run(
            &store,
            &[
                json!({"type": "new_game", "game_mode": "pvp"}),
                json!({"type": "move", "game_id": 1, "x": 4, "y": 3}),
                json!({"type": "download", "game_id": 1}),
                json!({"type": "resign", "game_id": 1}),
                json!({"type": "move", "game_id": 1, "x": i32::MIN, "y": 3}),
                json!({"type": "close", "game_id": 1}),
                json!({"type": "download", "game_id": 1}),
            ],
        );
        assert_eq!(replies.len(), 7);

        assert_eq!(replies[0]["status"], "success");
        assert_eq!(replies[0]["game_id"], 1);
        assert_eq!(replies[0]["player"], "Dark");
        assert_eq!(replies[0]["game_mode"], "pvp");
        assert!(replies[0]["message"].is_null());

        assert_eq!(replies[1]["player"], "Light");
        assert_eq!(replies[1]["board"][2][3], "Dark");

        let record: GameState = serde_json::from_value(replies[2].clone()).unwrap();
        assert_eq!(record.current_player, Color::Light);
        assert_eq!(record.moves_left, MAX_MOVES - 1);
        assert_eq!(record.mode, GameMode::Pvp);

        assert_eq!(replies[3]["status"], "fail");
        assert!(replies[3]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request"));

        assert_eq!(replies[4]["status"], "fail");
        assert_eq!(replies[4]["player"], "Light");

        assert_eq!(replies[5]["status"], "success");
        assert_eq!(replies[6]["status"], "fail");
        assert_eq!(replies[6]["message"], "No game with id 1.");
    }

    #[test]
    fn downloaded_record_can_be_uploaded() {
        let store = GameStore::default();
        let replies = run(
            &store,
            &[
                json!({"type": "new_game", "game_mode": "AI"}),
                json!({"type": "move", "game_id": 1, "x": 4, "y": 3}),
                json!({"type": "download", "game_id": 1}),
            ],
        );
        let record = replies[2].clone();
        assert_eq!(record["game_mode"], "ai");
        assert_eq!(record["current_player_colour"], "Dark");

        let replies = run(&store, &[json!({"type": "upload", "game": record})]);
        assert_eq!(replies[0]["status"], "success");
        assert_eq!(replies[0]["game_id"], 2);
        assert_eq!(replies[0]["moves_left"], MAX_MOVES - 2);
        assert_eq!(
            store.download(1).unwrap(),
            store.download(2).unwrap()
        );
    }
}
