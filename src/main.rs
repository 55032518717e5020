use anyhow::{anyhow, bail};
use clap::{Args, Parser, Subcommand};
use naval_duel::{
    init_logging, Board, Match, MatchConfig, MatchPhase, Seat, DEFAULT_BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct FleetArgs {
    /// Board dimension N (the board is N×N).
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Comma-separated ship lengths.
    #[arg(long, value_delimiter = ',', default_value = "5,4,3,3,2")]
    ships: Vec<usize>,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
}

impl FleetArgs {
    fn config(&self) -> anyhow::Result<MatchConfig> {
        let config = MatchConfig::new(self.ships.clone(), self.size);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play whole matches with the heuristic driving both seats and print a JSON summary.
    Sim {
        #[command(flatten)]
        fleet: FleetArgs,
        /// Number of matches to play.
        #[arg(long, default_value_t = 1)]
        games: u64,
    },
    /// Deal a random fleet and print the board.
    Deal {
        #[command(flatten)]
        fleet: FleetArgs,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim { fleet, games } => {
            let config = fleet.config()?;
            for game in 0..games {
                let mut m = match fleet.seed {
                    Some(s) => Match::with_seed(config.clone(), s.wrapping_add(game)),
                    None => Match::new(config.clone()),
                };
                let (turns, hits) = play_out(&mut m)?;
                let winner = match m.winner() {
                    Some(Seat::Human) => m.player(Seat::Human).name(),
                    Some(Seat::Computer) => m.player(Seat::Computer).name(),
                    None => bail!("match {} ended without a winner", game),
                };
                let result = json!({
                    "game": game,
                    "winner": winner,
                    "turns": turns,
                    "hits": hits,
                    "human_board": m.player(Seat::Human).board().derived_state(),
                    "computer_board": m.player(Seat::Computer).board().derived_state(),
                });
                println!("{}", serde_json::to_string(&result)?);
            }
        }
        Commands::Deal { fleet } => {
            let config = fleet.config()?;
            let mut rng = match fleet.seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => {
                    let mut seed_rng = rand::rng();
                    SmallRng::from_rng(&mut seed_rng)
                }
            };
            let mut board = Board::new(config.board_size);
            if !board.generate_random_ships(&config.ship_lengths, &mut rng) {
                bail!(
                    "fleet {:?} does not fit on a {}x{} board",
                    config.ship_lengths,
                    config.board_size,
                    config.board_size
                );
            }
            print!("{}", board);
        }
    }
    Ok(())
}

/// Drive the human seat with the heuristic until the match finishes.
/// Returns the number of human turns taken and how many of them struck a ship.
fn play_out(m: &mut Match) -> anyhow::Result<(usize, usize)> {
    if !m.start() {
        bail!("the configured fleet could not be dealt");
    }
    let limit = m.config().board_size * m.config().board_size;
    let mut turns = 0;
    let mut hits = 0;
    while m.phase() == MatchPhase::InProgress {
        let target = m
            .suggest_attack()
            .ok_or_else(|| anyhow!("no target left on turn {}", turns))?;
        let report = m
            .submit_attack(target)
            .ok_or_else(|| anyhow!("attack at {:?} was rejected", target))?;
        if report.result.is_hit() {
            hits += 1;
        }
        turns += 1;
        if turns > limit {
            bail!("match took too many turns");
        }
    }
    Ok((turns, hits))
}
