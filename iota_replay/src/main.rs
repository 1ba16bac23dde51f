use std::path::PathBuf;

use clap::{Parser, Subcommand};
use iota_replay::{load_record, replay_game, simulate_game, Recorder, ReplayOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info", global = true)]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Check recorded games turn by turn and report their points
    Replay {
        /// Paths to game record JSON files
        #[clap(num_args(1..), required = true)]
        records: Vec<PathBuf>,

        /// Print one JSON report per file instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Play solitaire games with a greedy strategy
    Simulate {
        /// How many games to play
        #[arg(short, long, default_value_t = 10)]
        num_games: usize,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// How often in a row a hand may be traded before the game ends
        #[arg(long, default_value_t = 3)]
        max_consecutive_passes: usize,

        /// Record the games as JSON files into this directory
        #[arg(short, long)]
        record_games_to_directory: Option<PathBuf>,
    },
}

fn run_replay(records: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let mut num_illegal = 0;
    for path in records {
        let record = load_record(path)?;
        let replay = replay_game(&record)?;
        if json {
            println!("{}", serde_json::to_string(&replay.report(path))?);
        } else {
            match &replay.outcome {
                ReplayOutcome::Completed => {
                    info!(
                        file = %path.display(),
                        turns = replay.turn_points.len(),
                        points = replay.total_points(),
                        "Replayed game"
                    );
                }
                ReplayOutcome::IllegalTurn { turn_idx, err } => {
                    info!(file = %path.display(), turn = turn_idx + 1, "Illegal turn");
                    let mut err_dyn = err as &dyn std::error::Error;
                    while let Some(src_err) = err_dyn.source() {
                        info!("{}", err_dyn);
                        err_dyn = src_err;
                    }
                    info!("{}", err_dyn);
                }
            }
            debug!("\n{}", replay.grid);
        }
        if matches!(replay.outcome, ReplayOutcome::IllegalTurn { .. }) {
            num_illegal += 1;
        }
    }
    if !json {
        eprintln!(
            "End result:\n- {} games replayed\n- {} with an illegal turn",
            records.len(),
            num_illegal
        );
    }
    Ok(())
}

fn run_simulation(
    num_games: usize,
    seed: Option<u64>,
    max_consecutive_passes: usize,
    record_games_to_directory: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Get a random seed
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut total_points: u32 = 0;
    let mut best_points: u32 = 0;
    for game_idx in 0..num_games {
        let game = simulate_game(&mut rng, max_consecutive_passes)?;
        debug!(
            game_idx,
            turns = game.record.turns.len(),
            points = game.points,
            cards_left = game.cards_left
        );
        debug!("\n{}", game.grid);
        if let Some(recorder) = &mut recorder {
            let path = recorder.write_game_record(&game.record)?;
            debug!(path = %path.display(), "Recorded game");
        }
        total_points += game.points;
        best_points = best_points.max(game.points);
    }

    if num_games > 0 {
        eprintln!(
            "End result:\n- {} games played\n- {:.1} points on average\n- {} points at best",
            num_games,
            total_points as f32 / num_games as f32,
            best_points
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    match args.command {
        Command::Replay { records, json } => run_replay(&records, json),
        Command::Simulate {
            num_games,
            seed,
            max_consecutive_passes,
            record_games_to_directory,
        } => run_simulation(
            num_games,
            seed,
            max_consecutive_passes,
            record_games_to_directory,
        ),
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
