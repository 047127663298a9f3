//! Public face of the scroll simulator.
//!
//! [`SimulationEngine`] owns the phase machine, its context and the
//! `active` flag. The dispatcher and the button path only ever call
//! [`start`](SimulationEngine::start), [`stop`](SimulationEngine::stop) and
//! [`set_speed`](SimulationEngine::set_speed); the run state changes only
//! inside [`tick`](SimulationEngine::tick).

use log::info;

use super::context::{Direction, SimContext};
use super::states::build_phase_table;
use super::{Fsm, Phase};
use crate::app::actuation::apply_scroll_steps;
use crate::app::events::SimSnapshot;
use crate::app::ports::ActuatorPort;
use crate::config::{MAX_SIM_SPEED, MIN_SIM_SPEED};
use crate::rng::Rng;

/// Read-only copy of the run state, for observers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub phase: Phase,
    pub transition_deadline: Option<u32>,
    pub tick_deadline: Option<u32>,
    pub direction: Direction,
    pub ticks_remaining: u8,
}

impl RunState {
    /// The state every stopped engine reports.
    pub const NEUTRAL: Self = Self {
        phase: Phase::Pause,
        transition_deadline: None,
        tick_deadline: None,
        direction: Direction::Down,
        ticks_remaining: 0,
    };
}

pub struct SimulationEngine {
    fsm: Fsm,
    ctx: SimContext,
    active: bool,
}

impl SimulationEngine {
    /// Inactive engine at `speed` (clamped), generator unseeded.
    pub fn new(speed: u8) -> Self {
        Self::with_rng(speed, Rng::new())
    }

    /// Inactive engine with a caller-supplied generator.
    pub fn with_rng(speed: u8, rng: Rng) -> Self {
        Self {
            fsm: Fsm::new(build_phase_table(), Phase::Pause),
            ctx: SimContext::new(speed.clamp(MIN_SIM_SPEED, MAX_SIM_SPEED), rng),
            active: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Activate and schedule a fresh pause from `now_ms`.
    ///
    /// Always restarts from `Pause`, even if already running, so no
    /// deadline from an earlier run can fire. `seed_material` is mixed
    /// into the generator the first time any start happens.
    pub fn start(&mut self, now_ms: u32, seed_material: u32) {
        if self.ctx.rng.seed_once(seed_material) {
            info!("sim: generator seeded");
        }
        self.active = true;
        self.ctx.clear_run_state();
        self.ctx.now_ms = now_ms;
        self.fsm.enter(Phase::Pause, &mut self.ctx);
        info!("sim: started at speed {}", self.ctx.speed);
    }

    /// Deactivate and neutralise the run state. Idempotent.
    pub fn stop(&mut self) {
        if self.active {
            info!("sim: stopped");
        }
        self.active = false;
        self.fsm.reset(Phase::Pause);
        self.ctx.clear_run_state();
    }

    /// Store `speed` clamped to 1–20. Applies from the next phase
    /// transition; running deadlines are left alone.
    pub fn set_speed(&mut self, speed: i32) {
        self.ctx.speed = speed.clamp(i32::from(MIN_SIM_SPEED), i32::from(MAX_SIM_SPEED)) as u8;
    }

    // ── Per-cycle update ──────────────────────────────────────

    /// Advance the machine to `now_ms`. Emits at most one wheel tick,
    /// through the same path as manual scrolling. Returns the phase
    /// transition taken, if any.
    pub fn tick(
        &mut self,
        now_ms: u32,
        scroll_sensitivity: f32,
        hw: &mut impl ActuatorPort,
    ) -> Option<(Phase, Phase)> {
        if !self.active {
            return None;
        }
        self.ctx.now_ms = now_ms;
        let transition = self.fsm.tick(&mut self.ctx);
        if let Some(steps) = self.ctx.pending_steps.take() {
            apply_scroll_steps(hw, steps, scroll_sensitivity);
        }
        transition
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn speed(&self) -> u8 {
        self.ctx.speed
    }

    pub fn phase(&self) -> Phase {
        self.fsm.current_phase()
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            active: self.active,
            speed: self.ctx.speed,
        }
    }

    pub fn run_state(&self) -> RunState {
        RunState {
            phase: self.fsm.current_phase(),
            transition_deadline: self.ctx.transition_deadline,
            tick_deadline: self.ctx.tick_deadline,
            direction: self.ctx.direction,
            ticks_remaining: self.ctx.ticks_remaining,
        }
    }
}
