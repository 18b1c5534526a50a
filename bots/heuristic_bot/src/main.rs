use std::path::PathBuf;

use clap::Parser;
use othello::{Board, Color, HeuristicAgent, HeuristicConfig, Move};
use othello_bot_utils::{initialize_logging, Bot};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
struct Args {
    /// JSON file overriding some or all of the heuristic's weights
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

struct HeuristicBot {
    agent: HeuristicAgent,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let config = match args.config {
        Some(path) => HeuristicConfig::load(&path)?,
        None => HeuristicConfig::default(),
    };
    info!(?config);
    HeuristicBot {
        agent: HeuristicAgent::new(config),
    }
    .run()
}

impl Bot for HeuristicBot {
    fn new_game(&mut self, color: Color) {
        debug!(%color, "New game");
    }

    fn play_turn(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.agent.choose_move(board, color)
    }
}
