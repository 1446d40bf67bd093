//! Spawner module - produces the next falling piece
//!
//! Shape choice is delegated to a [`ShapeSource`] so the random source is
//! owned explicitly and tests can replay a fixed sequence of shapes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::piece::ActivePiece;
use crate::types::ShapeId;

/// Supplies the shape of each spawned piece
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeId;
}

/// Uniform random shapes from a seeded PCG generator
#[derive(Debug, Clone)]
pub struct RandomShapes {
    rng: Pcg32,
    seed: u64,
}

impl RandomShapes {
    /// Create a source with the given seed; same seed, same shapes
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a source from a fresh random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> ShapeId {
        ShapeId::ALL[self.rng.random_range(0..ShapeId::ALL.len())]
    }
}

/// Replays a fixed script of shapes, cycling when it runs out
#[derive(Debug, Clone)]
pub struct SequenceShapes {
    shapes: Vec<ShapeId>,
    pos: usize,
}

impl SequenceShapes {
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl Into<Vec<ShapeId>>) -> Self {
        let shapes = shapes.into();
        assert!(!shapes.is_empty(), "shape sequence must not be empty");
        Self { shapes, pos: 0 }
    }

    /// The same shape forever
    pub fn repeat(shape: ShapeId) -> Self {
        Self::new(vec![shape])
    }
}

impl ShapeSource for SequenceShapes {
    fn next_shape(&mut self) -> ShapeId {
        let shape = self.shapes[self.pos];
        self.pos = (self.pos + 1) % self.shapes.len();
        shape
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> ShapeId {
        (**self).next_shape()
    }
}

/// Creates active pieces and counts them
#[derive(Debug, Clone)]
pub struct Spawner<S> {
    source: S,
    count: u32,
}

impl<S: ShapeSource> Spawner<S> {
    pub fn new(source: S) -> Self {
        Self { source, count: 0 }
    }

    /// Produce the next piece at the spawn position.
    ///
    /// No collision check happens here; the engine decides whether the spawn
    /// position is blocked.
    pub fn spawn(&mut self) -> ActivePiece {
        self.count += 1;
        ActivePiece::new(self.source.next_shape())
    }

    /// Produce the opening piece of a game without counting it.
    ///
    /// The counter tracks pieces spawned by locks, so the HUD reads 0 while
    /// the first piece falls and the first speed-up comes with the 10th lock.
    pub fn spawn_initial(&mut self) -> ActivePiece {
        ActivePiece::new(self.source.next_shape())
    }

    /// Number of pieces spawned by locks so far
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
