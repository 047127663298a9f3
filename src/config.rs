//! Device configuration parameters
//!
//! The settings snapshot consumed by the dispatcher (tap-to-click and the
//! two sensitivity scalars) plus loop timing. Values arrive from the
//! control surface as a whole struct and are sanitised before use.

use serde::{Deserialize, Serialize};

/// Lowest accepted sensitivity multiplier.
pub const MIN_SENSITIVITY: f32 = 0.1;
/// Highest accepted sensitivity multiplier.
pub const MAX_SENSITIVITY: f32 = 10.0;

/// Slowest simulation speed.
pub const MIN_SIM_SPEED: u8 = 1;
/// Fastest simulation speed.
pub const MAX_SIM_SPEED: u8 = 20;

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    // --- Pointer ---
    /// Whether a touchpad tap produces a primary click
    pub tap_to_click: bool,
    /// Multiplier applied to each pointer-move axis
    pub pointer_sensitivity: f32,

    // --- Scroll ---
    /// Multiplier applied to every wheel step, manual or simulated
    pub scroll_sensitivity: f32,

    // --- Simulation ---
    /// Simulation speed applied at boot (1-20)
    pub sim_speed: u8,

    // --- Timing ---
    /// Cooperative control loop period (milliseconds)
    pub loop_interval_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            tap_to_click: true,
            pointer_sensitivity: 1.0,
            scroll_sensitivity: 1.0,
            sim_speed: 5,
            loop_interval_ms: 5, // 200 Hz
        }
    }
}

impl DeviceConfig {
    /// Return a copy with every field forced into its legal range.
    ///
    /// Non-finite sensitivities fall back to the default of 1.0.
    pub fn sanitized(&self) -> Self {
        Self {
            tap_to_click: self.tap_to_click,
            pointer_sensitivity: clamp_sensitivity(self.pointer_sensitivity),
            scroll_sensitivity: clamp_sensitivity(self.scroll_sensitivity),
            sim_speed: self.sim_speed.clamp(MIN_SIM_SPEED, MAX_SIM_SPEED),
            loop_interval_ms: self.loop_interval_ms.clamp(1, 50),
        }
    }
}

fn clamp_sensitivity(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
    } else {
        1.0
    }
}
