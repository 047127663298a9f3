//! Actuator facade and scroll-unification layer.
//!
//! Every pointer, click and wheel actuation leaving the core passes
//! through here. Deltas are scaled, rounded and clamped to the signed
//! 8-bit HID range before they reach the [`ActuatorPort`].
//!
//! [`apply_scroll_steps`] is the only route to [`ActuatorPort::wheel`]:
//! manual scroll commands and simulated burst ticks both call it, so the
//! two produce identical wheel reports for identical steps.

use embedded_hal::delay::DelayNs;

use super::ports::ActuatorPort;

/// Hold time between press and release of a click.
pub const CLICK_HOLD_MS: u32 = 10;

/// Largest magnitude of any single HID delta.
pub const HID_DELTA_MAX: i32 = 127;

/// Clamp an integer delta to `[-127, 127]`.
pub fn clamp_delta(value: i32) -> i8 {
    value.clamp(-HID_DELTA_MAX, HID_DELTA_MAX) as i8
}

/// `clamp(round(value * scale), -127, 127)`.
///
/// The float-to-int cast saturates (and maps NaN to zero) before the
/// clamp, so no input can overflow.
pub fn scale_delta(value: i32, scale: f32) -> i8 {
    clamp_delta((value as f32 * scale).round() as i32)
}

/// Scale both axes by the pointer sensitivity and move the pointer.
pub fn move_pointer(hw: &mut impl ActuatorPort, dx: i32, dy: i32, sensitivity: f32) {
    hw.pointer_move(scale_delta(dx, sensitivity), scale_delta(dy, sensitivity));
}

/// Issue one wheel report for `steps` scaled by the scroll sensitivity.
pub fn apply_scroll_steps(hw: &mut impl ActuatorPort, steps: i32, sensitivity: f32) {
    hw.wheel(scale_delta(steps, sensitivity));
}

/// Press `mask`, hold for [`CLICK_HOLD_MS`], release.
pub fn click(hw: &mut (impl ActuatorPort + DelayNs), mask: u8) {
    hw.button_press(mask);
    hw.delay_ms(CLICK_HOLD_MS);
    hw.button_release(mask);
}
