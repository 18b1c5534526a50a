use clap::Parser;
use othello::{Agent, Board, Color, Move, RandomAgent};
use othello_bot_utils::{initialize_logging, Bot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot {
        agent: RandomAgent::new(rng),
    }
    .run()
}

struct RandomBot {
    agent: RandomAgent<StdRng>,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _color: Color) {}

    fn play_turn(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.agent.select_move(board, color)
    }
}
