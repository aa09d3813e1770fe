//! Random sources for quiz selection.
//!
//! | Source | Backing | Use |
//! |--------|---------|-----|
//! | [`OsRandom`] | `getrandom` (OS entropy) | Production |
//! | [`SplitMix64`] | Seeded PRNG | Tests and benches, reproducible runs |
//!
//! [`RandomSource::below`] draws an unbiased index with rejection sampling,
//! so every eligible question is equally likely regardless of the pool size.

use crate::Error;

/// Supplier of uniformly distributed 64-bit words.
pub trait RandomSource {
    /// Next uniformly distributed `u64`.
    fn next_u64(&mut self) -> Result<u64, Error>;

    /// Uniform index in `0..bound`.
    ///
    /// Returns `None` when `bound` is zero.
    fn below(&mut self, bound: usize) -> Result<Option<usize>, Error> {
        if bound == 0 {
            return Ok(None);
        }
        let bound = bound as u64;
        // Largest multiple of `bound` that fits; draws at or above it are rejected.
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let word = self.next_u64()?;
            if word < zone {
                return Ok(Some((word % bound) as usize));
            }
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> Result<u64, Error> {
        (**self).next_u64()
    }
}

/// Operating system entropy.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_u64(&mut self) -> Result<u64, Error> {
        let mut buf = [0u8; 8];
        getrandom::fill(&mut buf)
            .map_err(|e| Error::unprocessable(format!("system RNG failure: {e}")))?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Small deterministic generator (Steele, Lea and Flood's SplitMix64).
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a generator from a seed. Equal seeds give equal sequences.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for SplitMix64 {
    fn next_u64(&mut self) -> Result<u64, Error> {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        Ok(z ^ (z >> 31))
    }
}
