//! Function-pointer state machine driving the autonomous scroll simulation.
//!
//! Same table-driven pattern as a classic embedded FSM, sized for two
//! phases:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  PhaseTable                                              │
//! │  ┌────────┬───────────┬──────────┬───────────────────┐   │
//! │  │ Phase  │ on_enter  │ on_exit  │ on_update         │   │
//! │  ├────────┼───────────┼──────────┼───────────────────┤   │
//! │  │ Pause  │ fn(ctx)   │ —        │ fn(ctx)->Option<> │   │
//! │  │ Burst  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │   │
//! │  └────────┴───────────┴──────────┴───────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** phase. If it
//! returns `Some(next)`, the engine runs `on_exit` for the current phase,
//! then `on_enter` for the next. Handlers only touch [`SimContext`]; the
//! wheel ticks they request are applied by [`engine::SimulationEngine`]
//! through the scroll-unification layer.

pub mod context;
pub mod engine;
pub mod states;

use context::SimContext;
use log::debug;

pub use engine::SimulationEngine;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// The two phases of the simulation cycle.
/// Must stay in sync with the table built in [`states::build_phase_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    /// Reading: no scrolling until the transition deadline.
    Pause = 0,
    /// A short run of wheel ticks in one direction.
    Burst = 1,
}

impl Phase {
    /// Total number of phases — used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert a table index back to `Phase`. Out-of-range indices fall
    /// back to `Pause`, the neutral phase.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            1 => Self::Burst,
            0 => Self::Pause,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::Pause
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type PhaseActionFn = fn(&mut SimContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type PhaseUpdateFn = fn(&mut SimContext) -> Option<Phase>;

/// Static descriptor for a single phase.
pub struct PhaseDescriptor {
    pub id: Phase,
    pub name: &'static str,
    pub on_enter: Option<PhaseActionFn>,
    pub on_exit: Option<PhaseActionFn>,
    pub on_update: PhaseUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The phase machine. Owns the table and the current index; the mutable
/// [`SimContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `Phase as usize`.
    table: [PhaseDescriptor; Phase::COUNT],
    /// Index of the current phase.
    current: usize,
    /// Transitions taken since construction (wraps).
    transitions: u64,
}

impl Fsm {
    pub fn new(table: [PhaseDescriptor; Phase::COUNT], initial: Phase) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Jump to `phase` and run its `on_enter`, without running the current
    /// phase's `on_exit`. Used when (re)starting from a neutral state.
    pub fn enter(&mut self, phase: Phase, ctx: &mut SimContext) {
        self.current = phase as usize;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Set the current phase without running any hooks.
    pub fn reset(&mut self, phase: Phase) {
        self.current = phase as usize;
    }

    /// Advance by one update. Returns `(from, to)` if a transition ran.
    pub fn tick(&mut self, ctx: &mut SimContext) -> Option<(Phase, Phase)> {
        let next = (self.table[self.current].on_update)(ctx)?;
        let from = self.current_phase();
        self.transition(next, ctx);
        Some((from, next))
    }

    pub fn current_phase(&self) -> Phase {
        Phase::from_index(self.current)
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    fn transition(&mut self, next: Phase, ctx: &mut SimContext) {
        let next_idx = next as usize;

        debug!(
            "sim: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions = self.transitions.wrapping_add(1);

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

/// `true` once `now` has reached `deadline`, using signed distance so the
/// answer stays correct across the `u32` millisecond wrap (~49.7 days).
/// An unset deadline is never reached.
pub fn deadline_reached(now_ms: u32, deadline: Option<u32>) -> bool {
    deadline.is_some_and(|d| now_ms.wrapping_sub(d) as i32 >= 0)
}
