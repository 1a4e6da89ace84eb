use std::collections::HashSet;
use std::ops::Deref;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::SampleError;

/// Unique values in the order they were drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleResult(Vec<usize>);

impl SampleResult {
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for SampleResult {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

/// Draws unique indices out of a half-open range using a caller supplied
/// random source.
pub struct Sampler<R: Rng = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn sample(
        &mut self,
        count: usize,
        start: usize,
        end_exclusive: usize,
    ) -> Result<SampleResult, SampleError> {
        unique_random_numbers(&mut self.rng, count, start, end_exclusive)
    }
}

/// Rejection sampling: draw uniformly from `start..end_exclusive` and keep
/// every value not seen before until `count` values are collected.
///
/// Expected draw count grows sharply as `count` approaches the range size, so
/// callers are expected to ask for a handful of values out of a large range.
pub fn unique_random_numbers<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    start: usize,
    end_exclusive: usize,
) -> Result<SampleResult, SampleError> {
    if start > end_exclusive {
        return Err(SampleError::InvalidRange {
            start,
            end: end_exclusive,
        });
    }
    let available = end_exclusive - start;
    if count > available {
        return Err(SampleError::InsufficientRange {
            requested: count,
            available,
        });
    }

    let mut seen = HashSet::with_capacity(count);
    let mut picked = Vec::with_capacity(count);
    let mut draws = 0usize;
    while picked.len() < count {
        let candidate = rng.gen_range(start..end_exclusive);
        draws += 1;
        if seen.insert(candidate) {
            picked.push(candidate);
        }
    }
    debug!("sampled {count} of {available} values in {draws} draws");
    Ok(SampleResult(picked))
}
