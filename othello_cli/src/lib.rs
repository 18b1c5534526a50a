use std::io::{BufRead, Write};

use othello::{Color, GameMode, GameState, HeuristicAgent, Move, TurnError, TurnOutcome};
use tracing::debug;

/// The error type for parsing a move typed as `row,col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMoveError {
    WrongCount { count: usize },
    NotAnInteger,
    OutOfBounds { row: i64, col: i64 },
}

impl std::error::Error for ParseMoveError {}

impl std::fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMoveError::WrongCount { count } => {
                write!(f, "Exactly two coordinates are required, got {}.", count)
            }
            ParseMoveError::NotAnInteger => write!(f, "Coordinates must be integers."),
            ParseMoveError::OutOfBounds { row, col } => {
                write!(f, "Coordinates {},{} are outside the board bounds.", row, col)
            }
        }
    }
}

/// Parses 1-based `row,col` input into a 0-based move on a board of `size`.
pub fn parse_coords(input: &str, size: usize) -> Result<Move, ParseMoveError> {
    let parts: Vec<&str> = input.trim().split(',').map(str::trim).collect();
    let [row, col] = parts[..] else {
        return Err(ParseMoveError::WrongCount { count: parts.len() });
    };
    let row: i64 = row.parse().map_err(|_| ParseMoveError::NotAnInteger)?;
    let col: i64 = col.parse().map_err(|_| ParseMoveError::NotAnInteger)?;

    let in_bounds = |idx: i64| 1 <= idx && idx <= size as i64;
    if !in_bounds(row) || !in_bounds(col) {
        return Err(ParseMoveError::OutOfBounds { row, col });
    }
    Ok(Move::new(row as i32 - 1, col as i32 - 1))
}

pub fn print_welcome(output: &mut impl Write, size: usize) -> std::io::Result<()> {
    writeln!(output, "Welcome to Othello!")?;
    writeln!(output)?;
    writeln!(
        output,
        "Please enter your moves as two numbers between 1 and {}, comma-separated.",
        size
    )?;
    writeln!(output, "e.g. 3,4 makes a move on row 3 and column 4")
}

// Returns None at the end of input.
fn prompt(input: &mut impl BufRead, output: &mut impl Write, text: &str) -> anyhow::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Asks until the answer is a valid game mode.
pub fn choose_mode(mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<GameMode> {
    loop {
        let Some(line) = prompt(&mut input, &mut output, "Please enter a game mode (PvP, AI): ")?
        else {
            anyhow::bail!("Input ended before a game mode was chosen");
        };
        match line.parse::<GameMode>() {
            Ok(mode) => return Ok(mode),
            Err(err) => debug!(%err, input = line.trim()),
        }
    }
}

/// Plays `state` to the end, reading moves for people from `input`.
///
/// In AI mode, Light is played by the heuristic agent.
pub fn run_session(
    mut state: GameState,
    mut input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<GameState> {
    let agent = HeuristicAgent::default();
    let size = state.board.size();

    if let Some(TurnOutcome::Skipped { skipped }) = state.settle() {
        writeln!(output, "Skipping {}'s turn.", skipped)?;
    }

    while !state.finished {
        let color = state.current_player;
        writeln!(output)?;
        writeln!(output, "{}", state.board)?;
        writeln!(output)?;
        writeln!(output, "{}'s turn. {} moves left.", color, state.moves_left)?;

        let outcome = loop {
            let mv = if state.mode == GameMode::Ai && color == Color::Light {
                let Some(mv) = agent.choose_move(&state.board, color) else {
                    anyhow::bail!("The AI found no move for {}", color);
                };
                writeln!(output, "AI move: [{}, {}]", mv.row + 1, mv.col + 1)?;
                mv
            } else {
                let Some(line) = prompt(&mut input, &mut output, "Enter move: ")? else {
                    anyhow::bail!("Input ended during the game");
                };
                match parse_coords(&line, size) {
                    Ok(mv) => mv,
                    Err(err) => {
                        writeln!(output, "{}", err)?;
                        writeln!(
                            output,
                            "Enter your move as two comma-separated numbers between 1 and {}",
                            size
                        )?;
                        continue;
                    }
                }
            };

            match state.play(mv) {
                Ok(outcome) => break outcome,
                Err(TurnError::IllegalMove(err)) => {
                    debug!(%err);
                    writeln!(output, "Move is not legal.")?;
                }
                Err(err) => return Err(err.into()),
            }
        };

        if let TurnOutcome::Skipped { skipped } = outcome {
            writeln!(output, "Skipping {}'s turn.", skipped)?;
        }
    }

    print_result(&state, &mut output)?;
    Ok(state)
}

fn print_result(state: &GameState, output: &mut impl Write) -> std::io::Result<()> {
    writeln!(output)?;
    match state.board.winner() {
        Some(winner) => writeln!(output, "{} won!", winner)?,
        None => writeln!(output, "Draw.")?,
    }
    let counts = state.board.count_by_color();
    writeln!(output, "Dark: {} Light: {}", counts.dark, counts.light)
}
