//! Pseudo-random scheduler.
//!
//! A 32-bit xorshift generator (13 / 17 / 5) over a single mutable seed.
//! The seed holds [`SENTINEL_SEED`] until [`Rng::seed_once`] mixes in
//! real entropy; later calls to `seed_once` are no-ops, so the first
//! caller after boot wins.
//!
//! Not thread-safe. Owned by the simulation engine and touched only from
//! the control loop.

/// Seed used until entropy is mixed in (Marsaglia's reference seed).
pub const SENTINEL_SEED: u32 = 2_463_534_242;

/// Deterministic, seedable xorshift32 generator.
#[derive(Debug, Clone)]
pub struct Rng {
    seed: u32,
    seeded: bool,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng {
    /// Unseeded generator holding the sentinel seed.
    pub const fn new() -> Self {
        Self {
            seed: SENTINEL_SEED,
            seeded: false,
        }
    }

    /// Generator with an explicit seed, marked as already seeded.
    ///
    /// A zero seed would lock xorshift at zero forever, so it is replaced
    /// with the sentinel.
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            seed: if seed == 0 { SENTINEL_SEED } else { seed },
            seeded: true,
        }
    }

    /// Mix `material` into the seed the first time this is called.
    /// Returns `true` if this call performed the seeding.
    pub fn seed_once(&mut self, material: u32) -> bool {
        if self.seeded {
            return false;
        }
        self.seed = if material == 0 { SENTINEL_SEED } else { material };
        self.seeded = true;
        true
    }

    /// Whether entropy has been mixed in since construction.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Advance the recurrence and return the new seed.
    pub fn next32(&mut self) -> u32 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = x;
        x
    }

    /// Uniform draw in `[lo, hi]` inclusive. A degenerate range
    /// (`hi <= lo`) returns `lo` without advancing the generator.
    pub fn range(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = u64::from(hi - lo) + 1;
        lo + (u64::from(self.next32()) % span) as u32
    }
}

/// Fold the two monotonic clocks and the hardware identifier into 32 bits
/// of seed material.
pub fn seed_material(now_ms: u32, now_us: u64, hardware_id: u64) -> u32 {
    let us = (now_us ^ (now_us >> 32)) as u32;
    let id = (hardware_id ^ (hardware_id >> 32)) as u32;
    now_ms.rotate_left(16) ^ us ^ id.wrapping_mul(0x9E37_79B9)
}
