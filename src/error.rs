use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("number of dart boards must be at least 1, got {0}")]
    InvalidBoards(i64),

    #[error("number of darts to throw must be at least 1, got {0}")]
    InvalidDarts(i64),

    #[error("reference value of pi must be a positive finite number, got {0}")]
    InvalidReference(f64),

    #[error("could not read a board count from {0:?}")]
    BoardPrompt(String),

    #[error("no darts were thrown")]
    NoDarts,

    #[error("dart board {0} hung up before the throw target was reached")]
    BoardDisconnected(usize),

    #[error("dart board {0} panicked")]
    BoardPanicked(usize),

    #[error("unable to write results to {}", path.display())]
    Results {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
