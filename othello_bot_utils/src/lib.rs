use std::io::{BufRead, Write};

use othello::{Board, Color, Move, Okay, Request};
use tracing::trace;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, color: Color);
    /// Only called when `color` has a legal move. Returning `None` anyway
    /// stops the bot with an error.
    fn play_turn(&mut self, board: &Board, color: Color) -> Option<Move>;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        self.serve(std::io::stdin().lock(), std::io::stdout().lock())
    }

    /// Answers requests, one JSON object per line, until `Bye` or end of input.
    fn serve(&mut self, mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        let mut buf = String::new();

        loop {
            buf.clear(); // because read_line() appends to the buffer
            let num_bytes_read = input.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }
            trace!(request = buf.trim_end(), "Received request");

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { color } => {
                    self.new_game(color);
                    serde_json::to_writer(&mut output, &Okay())?;
                }
                Request::PlayTurn { board, color } => {
                    let Some(mv) = self.play_turn(&board, color) else {
                        anyhow::bail!("Asked to play {}, but found no move", color);
                    };
                    serde_json::to_writer(&mut output, &mv)?;
                }
                Request::Bye => break Ok(()),
            }
            writeln!(output)?;
            output.flush()?;
        }
    }
}

/// Sets up logging to stderr for the bots, the judge, the CLI and the server.
/// Stdout is left to the protocol or the game.
pub fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
