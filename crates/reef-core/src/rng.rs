//! Deterministic seeded random streams for scene generation.
//!
//! Scene layout and coral geometry must rebuild identically from a seed, so
//! this module avoids `rand` entirely and fixes the exact mixing steps as a
//! contract. Two streams built with the same seed produce identical draws.

/// Mulberry32 stream over explicit 32-bit wrapping arithmetic.
///
/// Used everywhere reproducibility matters: placement, per-instance geometry
/// parameters and vertex jitter. Not cryptographic, and not meant to be.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(s | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f64 / 4_294_967_296.0) as f32
    }

    /// Uniform draw in `[lo, hi)`.
    #[inline]
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, n: usize) -> usize {
        ((self.next_f32() * n as f32) as usize).min(n - 1)
    }

    /// True with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Derived per-instance seed, decoupling an instance's internal jitter
    /// from the master placement stream.
    #[inline]
    pub fn next_seed(&mut self) -> u32 {
        (self.next_f32() * 99_999.0) as u32
    }
}

/// Park-Miller stream used only by the sand texture baker, matching the
/// constants the baked maps were tuned against.
#[derive(Clone, Debug)]
pub struct TextureRng {
    state: u64,
}

impl TextureRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1) as u64,
        }
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.state = (self.state * 16_807) % 2_147_483_647;
        ((self.state - 1) as f64 / 2_147_483_646.0) as f32
    }
}
