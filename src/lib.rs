//! Monte Carlo estimation of pi on a farm of dart boards.
//!
//! A single farmer thread draws coordinates on the unit square and hands them,
//! one at a time, to a set of dart board threads. Each board reports whether
//! its dart landed inside the quarter circle; the farmer polls every board
//! without blocking, keeps the busy ones fed and tallies the hits.

pub mod board;
pub mod config;
pub mod coords;
pub mod error;
pub mod estimate;
pub mod farmer;
pub mod report;

pub use config::Config;
pub use coords::{Coordinate, CoordinateSource, SeededCoordinates};
pub use error::{Error, Result};
pub use estimate::Estimate;
pub use farmer::{throw_darts, Tally};

use std::time::Instant;

use report::Report;

/// Runs a full estimation for `config` and returns the report. Nothing is
/// written to the results file.
pub fn run(config: &Config) -> Result<Report> {
    config.validate()?;

    let start = Instant::now();
    let tally = farmer::throw_darts_with_progress(
        SeededCoordinates::new(config.seed),
        config.boards,
        config.darts,
        config.progress_interval,
    )?;
    let elapsed = start.elapsed();

    Ok(Report {
        estimate: Estimate::from_tally(tally, config.reference_pi)?,
        darts: tally.darts,
        reference_pi: config.reference_pi,
        elapsed,
        note: config.note.clone(),
    })
}
