use othello::{Color, GameMode, GameState, Move, Okay, Request};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::IllegalMove;
use crate::player::Player;
use crate::recording::Recorder;

pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    player_1: &mut Player,
    player_2: &mut Player,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Assign one bot the dark discs and the other the light discs randomly
    let colors = {
        let mut arr = [Color::Dark, Color::Light];
        arr.shuffle(rng);
        arr
    };
    let mut players = [player_1, player_2];

    // Inform the players about the new game, so that they can reset their state
    for (player, &color) in players.iter_mut().zip(colors.iter()) {
        let _: Okay = player.perform_request(recorder, &Request::NewGame { color })?;
    }

    let player_idx_of = |color: Color| if colors[0] == color { 0 } else { 1 };

    let mut state = GameState::new(GameMode::Pvp);
    // The state only stays unfinished while the current color has a legal move,
    // so nobody is ever asked to pass.
    let game_result = loop {
        if state.finished {
            break match state.board.winner() {
                Some(color) => GameResult::WonByPlayer {
                    player_idx: player_idx_of(color),
                },
                None => GameResult::Tie,
            };
        }
        let color = state.current_player;
        let player_idx = player_idx_of(color);
        let req = Request::PlayTurn {
            board: state.board.clone(),
            color,
        };
        let mv: Move = players[player_idx].perform_request(recorder, &req)?;
        match state.play(mv) {
            Ok(outcome) => debug!(player = players[player_idx].name, %mv, ?outcome),
            Err(err) => {
                break GameResult::IllegalMoveByPlayer {
                    player_idx,
                    err: IllegalMove { color, mv, err },
                };
            }
        }
    };

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }
    Ok(game_result)
}
