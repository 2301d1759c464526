use crate::error::{Error, Result};
use crate::farmer::Tally;

/// Value of pi the estimate is judged against unless configured otherwise.
pub const REFERENCE_PI: f64 = 3.14159;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub pi: f64,
    /// Relative distance from the reference value, in percent.
    pub error_percent: f64,
}

impl Estimate {
    pub fn from_tally(tally: Tally, reference: f64) -> Result<Self> {
        if tally.darts == 0 {
            return Err(Error::NoDarts);
        }

        let pi = 4.0 * tally.hits as f64 / tally.darts as f64;
        let error_percent = ((reference - pi) * (100.0 / reference)).abs();

        Ok(Estimate { pi, error_percent })
    }
}
