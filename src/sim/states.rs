//! Phase handler functions and table builder.
//!
//! ```text
//!  start() ──▶ PAUSE ──[pause deadline]──▶ BURST
//!                ▲                           │
//!                │                    tick every 350–700 ms
//!                │                    until ticks run out
//!                │                           │
//!                └──[300–900 ms after last tick]
//!
//!  stop() from anywhere ──▶ neutral PAUSE (no deadlines)
//! ```
//!
//! Pause length: 30–120 s minus `2 × speed` s, never below 15 s.
//! Burst: 82 % down (1–3 ticks), 18 % up (1–2 ticks), first tick
//! 60–140 ms in, nominal length 600 to `2200 − 40 × speed` ms.

use super::context::{Direction, SimContext};
use super::{deadline_reached, Phase, PhaseDescriptor};
use log::debug;

/// Pause draw, seconds.
pub const PAUSE_MIN_SECS: u32 = 30;
pub const PAUSE_MAX_SECS: u32 = 120;
/// Floor on the speed-adjusted pause.
pub const PAUSE_FLOOR_SECS: u32 = 15;

/// Percent chance a burst scrolls down.
pub const DOWN_PERCENT: u32 = 82;
pub const DOWN_TICKS_MAX: u32 = 3;
pub const UP_TICKS_MAX: u32 = 2;

pub const BURST_MIN_MS: u32 = 600;
pub const BURST_BASE_MAX_MS: u32 = 2200;
pub const BURST_SPEED_STEP_MS: u32 = 40;

pub const FIRST_TICK_MIN_MS: u32 = 60;
pub const FIRST_TICK_MAX_MS: u32 = 140;
pub const TICK_GAP_MIN_MS: u32 = 350;
pub const TICK_GAP_MAX_MS: u32 = 700;
pub const TAIL_MIN_MS: u32 = 300;
pub const TAIL_MAX_MS: u32 = 900;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the phase table. Called once when the engine is constructed.
pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        // Index 0 — Pause
        PhaseDescriptor {
            id: Phase::Pause,
            name: "Pause",
            on_enter: Some(pause_enter),
            on_exit: None,
            on_update: pause_update,
        },
        // Index 1 — Burst
        PhaseDescriptor {
            id: Phase::Burst,
            name: "Burst",
            on_enter: Some(burst_enter),
            on_exit: Some(burst_exit),
            on_update: burst_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  PAUSE
// ═══════════════════════════════════════════════════════════════════════════

fn pause_enter(ctx: &mut SimContext) {
    let secs = pause_secs(ctx.rng.range(PAUSE_MIN_SECS, PAUSE_MAX_SECS), ctx.speed);
    ctx.tick_deadline = None;
    ctx.ticks_remaining = 0;
    ctx.transition_deadline = Some(ctx.after(secs * 1000));
    debug!("sim: pausing {}s (speed {})", secs, ctx.speed);
}

fn pause_update(ctx: &mut SimContext) -> Option<Phase> {
    deadline_reached(ctx.now_ms, ctx.transition_deadline).then_some(Phase::Burst)
}

/// Speed-adjusted pause: `drawn − 2 × speed`, floored.
pub fn pause_secs(drawn_secs: u32, speed: u8) -> u32 {
    drawn_secs
        .saturating_sub(2 * u32::from(speed))
        .max(PAUSE_FLOOR_SECS)
}

// ═══════════════════════════════════════════════════════════════════════════
//  BURST
// ═══════════════════════════════════════════════════════════════════════════

fn burst_enter(ctx: &mut SimContext) {
    let (direction, max_ticks) = if ctx.rng.range(1, 100) <= DOWN_PERCENT {
        (Direction::Down, DOWN_TICKS_MAX)
    } else {
        (Direction::Up, UP_TICKS_MAX)
    };
    ctx.direction = direction;
    ctx.ticks_remaining = ctx.rng.range(1, max_ticks) as u8;

    let burst_ms = ctx.rng.range(BURST_MIN_MS, burst_max_ms(ctx.speed));
    let first_tick_ms = ctx.rng.range(FIRST_TICK_MIN_MS, FIRST_TICK_MAX_MS);
    ctx.transition_deadline = Some(ctx.after(burst_ms));
    ctx.tick_deadline = Some(ctx.after(first_tick_ms));
    debug!(
        "sim: burst {:?} x{} over {}ms",
        direction, ctx.ticks_remaining, burst_ms
    );
}

fn burst_exit(ctx: &mut SimContext) {
    ctx.tick_deadline = None;
    ctx.ticks_remaining = 0;
}

/// A burst never ends with ticks outstanding: the nominal deadline only
/// applies once every tick has been emitted, and the last tick replaces
/// it with a short tail.
fn burst_update(ctx: &mut SimContext) -> Option<Phase> {
    if ctx.ticks_remaining == 0 {
        return deadline_reached(ctx.now_ms, ctx.transition_deadline).then_some(Phase::Pause);
    }

    if deadline_reached(ctx.now_ms, ctx.tick_deadline) {
        ctx.pending_steps = Some(ctx.direction.steps());
        ctx.ticks_remaining -= 1;
        if ctx.ticks_remaining == 0 {
            let tail_ms = ctx.rng.range(TAIL_MIN_MS, TAIL_MAX_MS);
            ctx.tick_deadline = None;
            ctx.transition_deadline = Some(ctx.after(tail_ms));
        } else {
            let gap_ms = ctx.rng.range(TICK_GAP_MIN_MS, TICK_GAP_MAX_MS);
            ctx.tick_deadline = Some(ctx.after(gap_ms));
        }
    }
    None
}

/// Upper bound of the nominal burst length for `speed`.
pub fn burst_max_ms(speed: u8) -> u32 {
    BURST_BASE_MAX_MS.saturating_sub(BURST_SPEED_STEP_MS * u32::from(speed))
}
