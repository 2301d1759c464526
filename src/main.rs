use std::io;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dartboard::config::{prompt_board_count, Args};
use dartboard::report::append_report;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = try_main() {
        error!("{err}");
        process::exit(1);
    }
}

fn try_main() -> dartboard::Result<()> {
    let args = Args::parse();
    let config = args.into_config(|| prompt_board_count(io::stdin().lock(), io::stdout()))?;

    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    info!(cores, boards = config.boards, darts = config.darts, "starting dart boards");

    let report = dartboard::run(&config)?;

    println!("\n{report}");
    append_report(&config.results_path, &report)
}
