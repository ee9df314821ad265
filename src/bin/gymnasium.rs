use clap::Parser;
use color_eyre::Result;
use itertools::Itertools;
use log::{debug, info};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use snake_royale::{
    pit::constants::{GRID_HEIGHT, GRID_WIDTH},
    referee::{Match, MatchConfig},
};

/// Plays whole matches back to back without a clock and reports who wins.
#[derive(Parser, Debug)]
#[command(name = "gymnasium")]
struct Args {
    /// Number of matches to play
    #[arg(short = 'n', long, default_value_t = 10)]
    matches: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = GRID_WIDTH)]
    width: i64,

    #[arg(long, default_value_t = GRID_HEIGHT)]
    height: i64,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    info!("playing {} matches with seed {seed}", args.matches);

    let config = MatchConfig::sized(args.width, args.height);
    let mut arena = Match::new(config, StdRng::seed_from_u64(seed))?;

    let snakes = arena.game().snakes.len();
    let mut wins = vec![0u32; snakes];
    let mut totals = vec![0u64; snakes];

    for round in 0..args.matches {
        if round > 0 {
            arena.reset();
        }
        arena.run_to_completion();

        let winner = arena.winner().unwrap_or_default();
        wins[winner] += 1;
        for (total, score) in totals.iter_mut().zip(arena.scores()) {
            *total += score;
        }

        info!(
            "match {round}: snake {winner} wins after {} ticks ({})",
            arena.elapsed_ticks(),
            arena.scores().iter().join(", ")
        );
        debug!("final board:\n{}", arena.game());
    }

    println!("snake  wins  avg score");
    for (id, (wins, total)) in wins.iter().zip(&totals).enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let average = *total as f64 / f64::from(args.matches.max(1));
        println!("{id:>5}  {wins:>4}  {average:>9.2}");
    }

    Ok(())
}
