//! Seedable random source for the point sampler.
//!
//! Sampling is stochastic on purpose: every pass jitters glyph points and scatters coverage
//! points differently. Callers that need a reproducible frame pass a seeded [`Rng`]; everyone
//! else uses [`Rng::from_entropy`].

use std::num::Wrapping;

use ::rand::rngs::StdRng;
use ::rand::{Rng as _, SeedableRng};

/// Injected source of all sampling randomness.
#[derive(Debug, Clone)]
pub struct Rng {
    inner: StdRng,
}

impl Rng {
    /// Derives the generator from an arbitrary byte seed. Equal seeds yield equal sequences.
    pub fn from_seed(seed: &[u8]) -> Rng {
        let lower = murmur2(seed, 1690382925).swap_bytes();
        let upper = murmur2(seed, 72970470).swap_bytes();
        Rng {
            inner: StdRng::seed_from_u64(u64::from(lower) | (u64::from(upper) << 32)),
        }
    }

    /// Seeds a generator from the operating system's entropy source.
    pub fn from_entropy() -> Rng {
        Rng {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Picks a random value uniformly distributed between `0.0` (inclusive) and `1.0` (exclusive).
    pub fn rnd(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Picks a random value uniformly distributed between `min` (inclusive) and `max` (exclusive).
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.rnd() * (max - min) + min
    }

    /// Picks `true` with probability roughly `p`, or `false` otherwise. Any `p >= 1.0` always
    /// yields `true` and any `p < 0.0` always yields `false`.
    pub fn odds(&mut self, p: f64) -> bool {
        self.rnd() < p || p >= 1.0
    }
}


fn murmur2(bytes: &[u8], seed: u32) -> u32 {
    const K: usize = 16;
    const MASK: Wrapping<u32> = Wrapping(0xffff);
    const MASK_BYTE: Wrapping<u32> = Wrapping(0xff);
    const M: Wrapping<u32> = Wrapping(0x5bd1e995);

    let mut l: usize = bytes.len();
    let mut h = Wrapping(seed ^ (l as u32));
    let mut i = 0;

    let byte32 = |i: usize| Wrapping(u32::from(bytes[i]));

    while l >= 4 {
        let mut k = (byte32(i) & MASK_BYTE)
            | ((byte32(i + 1) & MASK_BYTE) << 8)
            | ((byte32(i + 2) & MASK_BYTE) << 16)
            | ((byte32(i + 3) & MASK_BYTE) << 24);
        i += 4;
        k = (k & MASK) * M + ((((k >> K) * M) & MASK) << K);
        k ^= k >> 24;
        k = (k & MASK) * M + ((((k >> K) * M) & MASK) << K);
        h = ((h & MASK) * M + ((((h >> K) * M) & MASK) << K)) ^ k;
        l -= 4;
    }
    if l >= 3 {
        h ^= (byte32(i + 2) & MASK_BYTE) << K;
    }
    if l >= 2 {
        h ^= (byte32(i + 1) & MASK_BYTE) << 8;
    }
    if l >= 1 {
        h ^= byte32(i) & MASK_BYTE;
        h = (h & MASK) * M + ((((h >> K) * M) & MASK) << K);
    }

    h ^= h >> 13;
    h = (h & MASK) * M + ((((h >> K) * M) & MASK) << K);
    h ^= h >> 15;

    h.0
}
