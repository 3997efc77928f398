//! Deterministic random source threaded through scene generation.
//!
//! A small LCG keeps scenes reproducible under an explicit seed while the
//! unseeded path draws its seed from the wall clock at call time.

const LCG_MUL: u32 = 1664525;
const LCG_ADD: u32 = 1013904223;

/// Linear congruential generator for procedural placement and phase sampling
#[derive(Debug, Clone)]
pub struct SceneRng {
    state: u32,
}

impl SceneRng {
    pub fn new(seed: u32) -> Self {
        // Mix once so small seeds diverge immediately
        let mut rng = Self { state: seed ^ 0x9E3779B9 };
        rng.next_u32();
        rng
    }

    /// Seed from the wall clock (production path when no seed is supplied)
    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_ADD);
        self.state
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Upper bits have the longest period
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [lo, hi)
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform integer in [lo, hi] (inclusive)
    pub fn range_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        lo + (self.next_u32() as usize) % (hi - lo + 1)
    }

    /// Bernoulli trial with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Pick a random element of a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.range_inclusive(0, items.len() - 1)]
    }
}

/// Wall-clock seed for the unseeded build path
pub fn clock_seed() -> u32 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64 as u32
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.subsec_nanos() ^ d.as_secs() as u32,
            Err(_) => 0x5EED_5EED,
        }
    }
}
