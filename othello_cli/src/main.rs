use clap::Parser;
use othello::{GameMode, GameState, BOARD_SIZE};
use othello_bot_utils::initialize_logging;
use othello_cli::{choose_mode, print_welcome, run_session};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

/// Play Othello in the terminal.
#[derive(Parser)]
struct Args {
    /// "pvp" or "ai". Asked interactively if not given.
    #[arg(short, long)]
    mode: Option<GameMode>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    print_welcome(&mut stdout, BOARD_SIZE)?;
    let mode = match args.mode {
        Some(mode) => mode,
        None => choose_mode(&mut stdin, &mut stdout)?,
    };
    info!(%mode, "Starting game");

    let state = run_session(GameState::new(mode), stdin, stdout)?;
    info!(moves_left = state.moves_left, "Game over");
    Ok(())
}
