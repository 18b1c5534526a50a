use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{play_game, GameResult, MatchScore, Player, PlayerConfig, Recorder, Standings};
use othello_bot_utils::initialize_logging;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;

/// Referees Othello bots. Every pair of players meets for a matchup.
#[derive(Parser)]
struct Args {
    /// Player config JSON files, at least two,
    /// e.g. {"nick": "heuristic", "cmd": ["target/release/heuristic_bot"]}
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// Games per matchup
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// Seed for assigning colors; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// End a matchup at the first illegal move instead of forfeiting the game
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Directory to write one JSON transcript per game into
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Referees games between two players.
struct Matchup<'a> {
    players: [Player; 2],
    rng: &'a mut StdRng,
    recorder: &'a mut Option<Recorder>,
    stop_on_illegal_move: bool,
}

impl Matchup<'_> {
    fn run(mut self, num_games: usize) -> anyhow::Result<MatchScore> {
        let mut score = MatchScore::default();
        for game_idx in 0..num_games {
            let [first, second] = &mut self.players;
            let result = play_game(self.rng, first, second, self.recorder)?;
            match &result {
                GameResult::WonByPlayer { player_idx } => {
                    debug!(game_idx, winner = self.players[*player_idx].name);
                }
                GameResult::Tie => debug!(game_idx, "Tie"),
                GameResult::IllegalMoveByPlayer { player_idx, err } => {
                    let offender = &self.players[*player_idx].name;
                    warn!(game_idx, player = offender, "Illegal move by player");
                    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(err);
                    while let Some(source) = cause {
                        warn!("{}", source);
                        cause = source.source();
                    }
                    if self.stop_on_illegal_move {
                        break;
                    }
                }
            }
            score.record(&result);
        }

        let [first, second] = &self.players;
        println!("{}", score.report([first.name.as_str(), second.name.as_str()]));
        Ok(score)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = args
        .record_games_to_directory
        .map(Recorder::new)
        .transpose()?;

    let configs: Vec<PlayerConfig> = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<anyhow::Result<_>>()?;

    let mut scores = HashMap::new();
    for (i1, i2) in (0..configs.len()).tuple_combinations::<(usize, usize)>() {
        let players = [
            Player::from_config(&configs[i1])?,
            Player::from_config(&configs[i2])?,
        ];
        info!(player_1 = players[0].name, player_2 = players[1].name, "Starting matchup");
        let matchup = Matchup {
            players,
            rng: &mut rng,
            recorder: &mut recorder,
            stop_on_illegal_move: args.stop_on_illegal_move,
        };
        scores.insert((i1, i2), matchup.run(args.num_games)?);
    }

    if configs.len() > 2 {
        let names = configs.iter().map(|config| config.nick.as_str()).collect();
        println!("\n{}", Standings { names, scores });
    }
    Ok(())
}
