use clap::Parser;
use game_server::{serve, GameStore};
use othello_bot_utils::initialize_logging;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

/// Serves Othello games as JSON lines over stdin/stdout.
#[derive(Parser)]
struct Args {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let store = GameStore::default();
    serve(&store, std::io::stdin().lock(), std::io::stdout().lock())?;
    info!(open_games = store.num_games(), "Input closed, shutting down");
    Ok(())
}
