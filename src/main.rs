use std::thread;

use anyhow::{Context, Result};
use torlife::{Config, Coord, Grid};
use tracing::info;

mod console;
mod logging;
mod options;
mod stats;

use stats::Recorder;

/// Runs the configured number of generations without a screen
fn run_headless(args: &options::Args, config: &Config, mut grid: Grid) -> Result<()> {
    let generations = config
        .generations
        .unwrap_or(torlife::config::DEFAULT_HEADLESS_GENERATIONS);
    let sleep = args.sleep()?;
    info!(
        rows = config.rows,
        cols = config.cols,
        alive = grid.alive_count(),
        generations,
        parallel = config.parallel,
        "starting headless run"
    );

    let mut stats = stats::RateRecord::new(grid.alive_count());
    for _ in 0..generations {
        // report metrics every 500ms
        if stats.has_report() {
            info!("{}", stats.report());
        }

        // compute the next generation
        if config.parallel {
            grid.step_parallel();
        } else {
            grid.step();
        }
        stats.record(grid.tick_count(), grid.alive_count());
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    info!(
        ticks = grid.tick_count(),
        alive = stats.alive(),
        "headless run finished"
    );

    if args.print() {
        let (rows, cols) = grid.dimensions();
        println!("{}", grid.window(Coord::zero(), rows, cols).glyphs("#", "."));
    }
    println!("{}", stats.alive());
    Ok(())
}

fn main() -> Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };
    logging::init(args.log_level()?, args.log_file().as_deref())?;

    let config = args.config()?;
    let grid = config
        .build_grid(&mut config.rng())
        .context("failed to set up the starting grid")?;

    if args.console() {
        console::run(&config, grid)
    } else {
        run_headless(&args, &config, grid)
    }
}
