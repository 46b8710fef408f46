use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};


/// Anything able to pick an index in `[0, max)`.
///
/// The roll engine only ever asks for one index per die draw, so a source can
/// be as simple as a closure. Indices at or above `max` returned by an
/// injected source are wrapped back into range.
///
/// # Examples
/// ```
/// use notation_rocks::{execute, parse};
///
/// let config = parse("3d6").unwrap();
///
/// // Always rolls the highest face.
/// let result = execute(&config, |max: u32| max - 1).unwrap();
/// assert_eq!(result.total, 18);
/// ```
pub trait RandomSource {
    /// Returns an index in `[0, max)`. `max` is never zero.
    fn next_index(&mut self, max: u32) -> u32;
}

impl<F> RandomSource for F
where
    F: FnMut(u32) -> u32
{
    fn next_index(&mut self, max: u32) -> u32 {
        self(max) % max
    }
}


/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    /// Wraps `rng`.
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<ThreadRng> {
    /// Non-deterministic source backed by the thread-local generator.
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source: the same seed always yields the same rolls.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for RngSource<ThreadRng> {
    fn default() -> Self {
        Self::thread()
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, max: u32) -> u32 {
        self.0.random_range(0..max)
    }
}
