//! Dart board workers and the channel pair connecting each one to the farmer.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use crossbeam::select;
use tracing::trace;

use crate::coords::Coordinate;
use crate::error::{Error, Result};

/// Result a board reports before it has seen any dart.
pub const READY: u8 = 0;

/// Hit test against the quarter circle of radius 1. Points exactly on the arc
/// count as hits.
pub fn classify(c: Coordinate) -> u8 {
    let r2 = c.x * c.x + c.y * c.y;
    if r2 <= 1.0 {
        1
    } else {
        0
    }
}

/// Farmer-side handle to one dart board thread.
///
/// Both directions are zero-capacity rendezvous channels: a send only
/// completes once the other side is there to take the value.
pub struct Board {
    id: usize,
    coords: Sender<Coordinate>,
    results: Receiver<u8>,
    worker: Option<JoinHandle<()>>,
}

impl Board {
    /// Spawns board `id`. The board stops as soon as `shutdown` is
    /// disconnected, i.e. when every sender of that channel has been dropped.
    pub fn spawn(id: usize, shutdown: Receiver<()>) -> Result<Self> {
        Self::spawn_with(id, shutdown, classify)
    }

    /// Spawns board `id` scoring darts with `classifier` instead of [`classify`].
    pub(crate) fn spawn_with(
        id: usize,
        shutdown: Receiver<()>,
        classifier: fn(Coordinate) -> u8,
    ) -> Result<Self> {
        let (coords_tx, coords_rx) = channel::bounded::<Coordinate>(0);
        let (results_tx, results_rx) = channel::bounded::<u8>(0);

        let worker = thread::Builder::new()
            .name(format!("dartboard-{id}"))
            .spawn(move || {
                Self::worker_thread(id, classifier, coords_rx, results_tx, shutdown)
            })?;

        Ok(Board {
            id,
            coords: coords_tx,
            results: results_rx,
            worker: Some(worker),
        })
    }

    /// The board loop: announce readiness, then receive, classify and answer
    /// until cancelled.
    ///
    /// ```text
    /// results <- READY
    /// loop {
    ///     c <- coords
    ///     results <- classify(c)
    /// }
    /// ```
    fn worker_thread(
        id: usize,
        classifier: fn(Coordinate) -> u8,
        coords: Receiver<Coordinate>,
        results: Sender<u8>,
        shutdown: Receiver<()>,
    ) {
        let mut outcome = READY;

        loop {
            let delivered = select! {
                send(results, outcome) -> res => res.is_ok(),
                recv(shutdown) -> _ => false,
            };
            if !delivered {
                break;
            }

            let dart = select! {
                recv(coords) -> msg => msg.ok(),
                recv(shutdown) -> _ => None,
            };
            let Some(dart) = dart else {
                break;
            };

            outcome = classifier(dart);
            debug_assert!(outcome <= 1, "board {id} produced {outcome}");
        }

        trace!(board = id, "dart board stopped");
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Non-blocking check for a finished dart.
    pub fn poll(&self) -> Result<Option<u8>> {
        match self.results.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::BoardDisconnected(self.id)),
        }
    }

    /// Hands a dart to the board. Only call this right after [`Board::poll`]
    /// returned a result, when the board is known to be waiting.
    pub fn throw(&self, dart: Coordinate) -> Result<()> {
        self.coords
            .send(dart)
            .map_err(|_| Error::BoardDisconnected(self.id))
    }

    /// Waits for the board thread to finish. The shutdown channel must have
    /// been disconnected first, otherwise this blocks forever.
    pub fn join(mut self) -> Result<()> {
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| Error::BoardPanicked(self.id)),
            None => Ok(()),
        }
    }
}
