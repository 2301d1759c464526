//! Presenting a finished run: console summary and the results file.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::{Error, Result};
use crate::estimate::Estimate;

const SEPARATOR: &str =
    "________________________________________________________________________";

#[derive(Debug, Clone)]
pub struct Report {
    pub estimate: Estimate,
    pub darts: u64,
    pub reference_pi: f64,
    pub elapsed: Duration,
    pub note: String,
}

impl Report {
    /// Text block appended to the results file for this run.
    pub fn results_block(&self) -> String {
        format!(
            "\nNOTE: {}\
             \n\nPi approx   = {:.6} using {} darts\
             \n\nPi actually = {:.6} Error = {:.6}%\
             \n\nElapsed time = {:?}\
             \n{}",
            self.note,
            self.estimate.pi,
            self.darts,
            self.reference_pi,
            self.estimate.error_percent,
            self.elapsed,
            SEPARATOR,
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pi approx   = {} using {} darts", self.estimate.pi, self.darts)?;
        writeln!(
            f,
            "Pi actually = {}  Error = {}%",
            self.reference_pi, self.estimate.error_percent
        )?;
        write!(f, "Elapsed time = {:?}", self.elapsed)
    }
}

/// Appends the report to `path`, creating the file if needed.
pub fn append_report(path: &Path, report: &Report) -> Result<()> {
    let wrap = |source| Error::Results {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(wrap)?;
    file.write_all(report.results_block().as_bytes())
        .map_err(wrap)?;

    info!(path = %path.display(), "results appended");
    Ok(())
}
