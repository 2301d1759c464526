//! The farmer: throws darts at every board and keeps the score.

use crossbeam::channel::{self, Receiver};
use crossbeam::utils::Backoff;
use tracing::{debug, info};

use crate::board::Board;
use crate::coords::{Coordinate, CoordinateSource};
use crate::error::{Error, Result};

/// Final counts of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub darts: u64,
    pub hits: u64,
}

/// Coordinating state. Lives on the calling thread only; boards see nothing
/// but the coordinates handed to them.
struct Farmer<S> {
    source: S,
    target: u64,
    progress_interval: u64,
    next_dart: Coordinate,
    dispatched: u64,
    tally: Tally,
    // whether board i is working on a real dart rather than its ready signal
    in_flight: Vec<bool>,
}

impl<S: CoordinateSource> Farmer<S> {
    fn new(mut source: S, target: u64, boards: usize, progress_interval: u64) -> Self {
        let next_dart = source.next_coordinate();
        Farmer {
            source,
            target,
            progress_interval,
            next_dart,
            dispatched: 0,
            tally: Tally { darts: 0, hits: 0 },
            in_flight: vec![false; boards],
        }
    }

    fn done(&self) -> bool {
        self.tally.darts >= self.target
    }

    /// Sweeps the boards in index order until every dart has come back.
    fn run(&mut self, boards: &[Board]) -> Result<()> {
        let backoff = Backoff::new();

        while !self.done() {
            let mut idle = true;

            for (i, board) in boards.iter().enumerate() {
                let Some(outcome) = board.poll()? else {
                    continue;
                };
                idle = false;
                self.collect(i, outcome);

                if self.dispatched < self.target {
                    board.throw(self.next_dart)?;
                    self.dispatched += 1;
                    self.in_flight[i] = true;
                    if self.dispatched < self.target {
                        self.next_dart = self.source.next_coordinate();
                    }
                }

                if self.done() {
                    break;
                }
            }

            // escalates to yielding when boards share the farmer's core
            if idle {
                backoff.snooze();
            } else {
                backoff.reset();
            }
        }

        Ok(())
    }

    fn collect(&mut self, board: usize, outcome: u8) {
        if !std::mem::replace(&mut self.in_flight[board], false) {
            return;
        }

        self.tally.darts += 1;
        self.tally.hits += u64::from(outcome);

        if self.progress_interval > 0 && self.tally.darts % self.progress_interval == 0 {
            debug!(
                darts = self.tally.darts,
                hits = self.tally.hits,
                "darts thrown so far"
            );
        }
    }
}

/// Throws `target` darts drawn from `source` across `boards` dart boards and
/// returns the final counts.
///
/// Every dispatched dart is waited for, so the result of the last dart is
/// part of the tally and `hits` only depends on the first `target`
/// coordinates of `source`, not on how the boards were scheduled.
pub fn throw_darts<S>(source: S, boards: usize, target: u64) -> Result<Tally>
where
    S: CoordinateSource,
{
    throw_darts_with_progress(source, boards, target, 0)
}

/// Like [`throw_darts`], logging the running counts every
/// `progress_interval` darts. An interval of 0 disables progress logging.
pub fn throw_darts_with_progress<S>(
    source: S,
    boards: usize,
    target: u64,
    progress_interval: u64,
) -> Result<Tally>
where
    S: CoordinateSource,
{
    farm(source, boards, target, progress_interval, Board::spawn)
}

fn farm<S, F>(
    source: S,
    boards: usize,
    target: u64,
    progress_interval: u64,
    mut spawn: F,
) -> Result<Tally>
where
    S: CoordinateSource,
    F: FnMut(usize, Receiver<()>) -> Result<Board>,
{
    if boards == 0 {
        return Err(Error::InvalidBoards(0));
    }
    if target == 0 {
        return Err(Error::InvalidDarts(0));
    }

    let (stop, shutdown) = channel::bounded::<()>(0);
    let mut spawned = Vec::with_capacity(boards);
    for id in 0..boards {
        match spawn(id, shutdown.clone()) {
            Ok(board) => spawned.push(board),
            Err(err) => {
                drop(stop);
                join_all(spawned)?;
                return Err(err);
            }
        }
    }
    info!(boards, target, "dart boards started");

    let mut farmer = Farmer::new(source, target, boards, progress_interval);
    let outcome = farmer.run(&spawned);

    drop(stop);
    // a panicked board takes precedence over the disconnect it caused
    join_all(spawned)?;
    outcome?;

    info!(
        darts = farmer.tally.darts,
        hits = farmer.tally.hits,
        "all darts thrown"
    );
    Ok(farmer.tally)
}

fn join_all(boards: Vec<Board>) -> Result<()> {
    let mut first_err = None;
    for board in boards {
        if let Err(err) = board.join() {
            first_err.get_or_insert(err);
        }
    }
    first_err.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::classify;
    use crate::coords::{ScriptedCoordinates, SeededCoordinates};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn darts(coords: &[(f64, f64)]) -> ScriptedCoordinates<std::vec::IntoIter<Coordinate>> {
        ScriptedCoordinates::new(
            coords
                .iter()
                .map(|&(x, y)| Coordinate::new(x, y))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn single_board_scripted_run() {
        let source = darts(&[(0.0, 0.0), (1.0, 1.0), (0.5, 0.5), (1.0, 0.0)]);

        let tally = throw_darts(source, 1, 4).unwrap();

        assert_eq!(tally, Tally { darts: 4, hits: 3 });
    }

    #[test]
    fn last_dart_is_tallied() {
        let tally = throw_darts(darts(&[(0.0, 0.0)]), 1, 1).unwrap();
        assert_eq!(tally, Tally { darts: 1, hits: 1 });

        let tally = throw_darts(darts(&[(0.9, 0.9), (0.1, 0.1)]), 3, 2).unwrap();
        assert_eq!(tally, Tally { darts: 2, hits: 1 });
    }

    #[test]
    fn generates_exactly_target_coordinates() {
        // one coordinate more would exhaust the script and panic
        let source = darts(&[(0.2, 0.2); 5]);
        let tally = throw_darts(source, 4, 5).unwrap();
        assert_eq!(tally, Tally { darts: 5, hits: 5 });
    }

    #[test]
    fn more_boards_than_darts() {
        let source = darts(&[(0.9, 0.9), (0.3, 0.3)]);
        let tally = throw_darts(source, 16, 2).unwrap();
        assert_eq!(tally, Tally { darts: 2, hits: 1 });
    }

    #[test]
    fn dart_count_reaches_target() {
        for boards in [1, 2, 3, 8] {
            for target in [1, 2, 7, 100, 1_001] {
                let tally = throw_darts(SeededCoordinates::new(999), boards, target).unwrap();
                assert_eq!(tally.darts, target);
                assert!(tally.hits <= tally.darts);
            }
        }
    }

    #[test]
    fn hits_do_not_depend_on_board_count() {
        let expected = throw_darts(SeededCoordinates::new(7), 1, 5_000).unwrap();

        for boards in [2, 4, 9] {
            let tally = throw_darts(SeededCoordinates::new(7), boards, 5_000).unwrap();
            assert_eq!(tally, expected);
        }
    }

    #[test]
    fn rejects_empty_configuration() {
        assert!(matches!(
            throw_darts(SeededCoordinates::new(1), 0, 10),
            Err(Error::InvalidBoards(0))
        ));
        assert!(matches!(
            throw_darts(SeededCoordinates::new(1), 2, 0),
            Err(Error::InvalidDarts(0))
        ));
    }

    #[test]
    fn rejects_before_drawing_coordinates() {
        // an empty script panics if the farmer ever asks it for a dart
        let source = darts(&[]);
        assert!(throw_darts(source, 0, 1).is_err());
    }

    #[test]
    fn progress_logging_does_not_change_counts() {
        let plain = throw_darts(SeededCoordinates::new(3), 2, 1_000).unwrap();
        let logged = throw_darts_with_progress(SeededCoordinates::new(3), 2, 1_000, 100).unwrap();
        assert_eq!(plain, logged);
    }

    #[test]
    fn idle_farmer_leaves_room_for_boards() {
        // a farmer that never yields starves a board sharing its core
        let start = std::time::Instant::now();
        let tally = throw_darts(SeededCoordinates::new(5), 1, 20_000).unwrap();

        assert_eq!(tally.darts, 20_000);
        assert!(start.elapsed() < Duration::from_secs(20));
    }

    fn broken_classifier(_: Coordinate) -> u8 {
        panic!("dart board fell off the wall")
    }

    #[test]
    fn panicked_board_is_reported_and_others_stopped() {
        let (done, finished) = mpsc::channel();

        thread::spawn(move || {
            // the target is out of reach, so only the broken board can end the run
            let outcome = farm(SeededCoordinates::new(11), 3, u64::MAX, 0, |id, shutdown| {
                let classifier: fn(Coordinate) -> u8 = if id == 2 {
                    broken_classifier
                } else {
                    classify
                };
                Board::spawn_with(id, shutdown, classifier)
            });
            done.send(outcome).unwrap();
        });

        let outcome = finished
            .recv_timeout(Duration::from_secs(30))
            .expect("farmer hung after a board died");
        assert!(matches!(outcome, Err(Error::BoardPanicked(2))));
    }
}
