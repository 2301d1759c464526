//! Run parameters, command line parsing and the board-count prompt.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};
use crate::estimate::REFERENCE_PI;

pub const DEFAULT_DARTS: u64 = 10_000_000;
pub const DEFAULT_SEED: u64 = 999;
pub const DEFAULT_RESULTS_PATH: &str = "PiResults.txt";
pub const DEFAULT_NOTE: &str = "rand in farmer only";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub boards: usize,
    pub darts: u64,
    pub reference_pi: f64,
    pub seed: u64,
    pub results_path: PathBuf,
    /// Free text written at the head of every results block.
    pub note: String,
    /// Log running counts every this many darts, 0 to stay quiet.
    pub progress_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            boards: 1,
            darts: DEFAULT_DARTS,
            reference_pi: REFERENCE_PI,
            seed: DEFAULT_SEED,
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            note: DEFAULT_NOTE.to_string(),
            progress_interval: 1_000_000,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.boards == 0 {
            return Err(Error::InvalidBoards(0));
        }
        if self.darts == 0 {
            return Err(Error::InvalidDarts(0));
        }
        if !self.reference_pi.is_finite() || self.reference_pi <= 0.0 {
            return Err(Error::InvalidReference(self.reference_pi));
        }
        Ok(())
    }
}

/// Estimate pi by throwing darts at a set of concurrent dart boards.
#[derive(Debug, Parser)]
#[command(name = "dartboard", version, about)]
pub struct Args {
    /// Number of dart boards; asked for on the terminal when omitted
    #[arg(short, long, allow_negative_numbers = true)]
    pub boards: Option<i64>,

    /// Total number of darts to throw
    #[arg(short, long, default_value_t = DEFAULT_DARTS as i64, allow_negative_numbers = true)]
    pub darts: i64,

    /// Seed for the coordinate generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Value of pi the estimate is compared against
    #[arg(long, default_value_t = REFERENCE_PI)]
    pub reference_pi: f64,

    /// File the results are appended to
    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    pub results: PathBuf,

    /// Note written at the head of the results block
    #[arg(long, default_value = DEFAULT_NOTE)]
    pub note: String,

    /// Log progress every N darts (0 disables)
    #[arg(long, default_value_t = 1_000_000)]
    pub progress_interval: u64,
}

impl Args {
    /// Builds a validated [`Config`], calling `prompt` for the board count if
    /// it was not given on the command line.
    pub fn into_config<F>(self, prompt: F) -> Result<Config>
    where
        F: FnOnce() -> Result<i64>,
    {
        let darts: u64 = positive(self.darts).ok_or(Error::InvalidDarts(self.darts))?;
        let boards = match self.boards {
            Some(boards) => boards,
            None => prompt()?,
        };

        let config = Config {
            boards: positive(boards).ok_or(Error::InvalidBoards(boards))?,
            darts,
            reference_pi: self.reference_pi,
            seed: self.seed,
            results_path: self.results,
            note: self.note,
            progress_interval: self.progress_interval,
        };
        config.validate()?;
        Ok(config)
    }
}

fn positive<T: TryFrom<i64>>(n: i64) -> Option<T> {
    if n < 1 {
        return None;
    }
    T::try_from(n).ok()
}

/// Asks for the number of dart boards and reads the answer from `input`.
pub fn prompt_board_count<R, W>(mut input: R, mut output: W) -> Result<i64>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Enter number of dart boards to throw darts at: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim();
    let boards: i64 = answer
        .parse()
        .map_err(|_| Error::BoardPrompt(answer.to_string()))?;
    if boards < 1 {
        return Err(Error::InvalidBoards(boards));
    }

    writeln!(output, "{boards} boards")?;
    Ok(boards)
}
