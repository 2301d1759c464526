//! Dart coordinates and the sources that produce them.

use rand::{distributions::Standard, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A point on the unit square, both components in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }
}

/// Anything the farmer can pull the next dart from.
pub trait CoordinateSource {
    fn next_coordinate(&mut self) -> Coordinate;
}

/// Reproducible stream of uniformly distributed coordinates.
pub struct SeededCoordinates {
    rng: ChaCha8Rng,
}

impl SeededCoordinates {
    pub fn new(seed: u64) -> Self {
        SeededCoordinates {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CoordinateSource for SeededCoordinates {
    fn next_coordinate(&mut self) -> Coordinate {
        let x = self.rng.sample(Standard);
        let y = self.rng.sample(Standard);
        Coordinate { x, y }
    }
}

/// Replays a fixed sequence of coordinates.
///
/// Panics once the sequence runs dry, so callers must supply at least as many
/// coordinates as darts they intend to throw.
pub struct ScriptedCoordinates<I> {
    coords: I,
}

impl<I> ScriptedCoordinates<I>
where
    I: Iterator<Item = Coordinate>,
{
    pub fn new<T>(coords: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        ScriptedCoordinates {
            coords: coords.into_iter(),
        }
    }
}

impl<I> CoordinateSource for ScriptedCoordinates<I>
where
    I: Iterator<Item = Coordinate>,
{
    fn next_coordinate(&mut self) -> Coordinate {
        self.coords
            .next()
            .expect("scripted coordinate sequence exhausted")
    }
}
