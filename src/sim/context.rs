//! Mutable context threaded through every phase handler.
//!
//! Holds the pacing configuration (speed), the run state (deadlines,
//! direction, remaining ticks), the generator, and the wheel step a
//! handler wants emitted this cycle.

use crate::rng::Rng;

/// Scroll direction of a burst.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Forward through content (negative wheel).
    #[default]
    Down,
    /// Back up the page (positive wheel).
    Up,
}

impl Direction {
    /// Signed unit step for this direction.
    pub const fn steps(self) -> i32 {
        match self {
            Self::Down => -1,
            Self::Up => 1,
        }
    }
}

pub struct SimContext {
    // -- Timing --
    /// Loop time of the current update (milliseconds, wrapping).
    pub now_ms: u32,

    // -- Configuration --
    /// Pacing, 1 (slowest) to 20 (fastest).
    pub speed: u8,

    // -- Run state --
    /// When the current phase ends. `None` while stopped.
    pub transition_deadline: Option<u32>,
    /// When the next burst tick is due. Only set during a burst.
    pub tick_deadline: Option<u32>,
    pub direction: Direction,
    /// Wheel ticks still to emit in this burst.
    pub ticks_remaining: u8,

    // -- Output --
    /// Wheel step requested by the handler this update.
    pub pending_steps: Option<i32>,

    pub rng: Rng,
}

impl SimContext {
    pub fn new(speed: u8, rng: Rng) -> Self {
        Self {
            now_ms: 0,
            speed,
            transition_deadline: None,
            tick_deadline: None,
            direction: Direction::default(),
            ticks_remaining: 0,
            pending_steps: None,
            rng,
        }
    }

    /// Return the run state to neutral. Speed and the generator persist.
    pub fn clear_run_state(&mut self) {
        self.transition_deadline = None;
        self.tick_deadline = None;
        self.direction = Direction::default();
        self.ticks_remaining = 0;
        self.pending_steps = None;
    }

    /// Absolute time `delay_ms` from now.
    pub fn after(&self, delay_ms: u32) -> u32 {
        self.now_ms.wrapping_add(delay_ms)
    }
}
