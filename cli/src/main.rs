use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use minegrid_core::{CellCount, Coord, GridConfig, Session, TurnOutcome};

mod logger;

/// Lets the inference agent play one game of minegrid.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Side length of the square grid
    #[arg(short, long, default_value_t = 10)]
    dimension: Coord,

    /// Number of hidden mines
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of deriving one from the clock
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

fn clock_seed() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(elapsed.as_nanos() as u64)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter()).context("could not install logger")?;

    let config = GridConfig::new(args.dimension, args.mines)?;
    let seed = match args.seed {
        Some(seed) => seed,
        None => clock_seed()?,
    };
    log::debug!("seed: {}", seed);

    let mut session = Session::seeded(config, seed)?;
    loop {
        if !args.json {
            println!("{}", session.grid().visible_view());
        }
        let outcome = session
            .play_turn()
            .with_context(|| format!("turn {} failed (seed {})", session.turns() + 1, seed))?;
        if outcome.is_finished() {
            break;
        }
    }

    let report = session.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.outcome {
        TurnOutcome::Won => {
            println!("{}", session.grid().visible_view());
            println!("Cleared the grid in {} turns.", report.turns);
        }
        _ => {
            let mut grid = session.into_grid();
            grid.reveal_all();
            println!("{}", grid.visible_view());
            println!("Hit a mine after {} turns.", report.turns);
        }
    }

    Ok(())
}
