//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (HID link, clock, button sampler, event sinks) implement
//! these traits. The [`AppService`](super::service::AppService) consumes
//! them via generics, so the command core never touches hardware directly.

use crate::queue::CommandQueue;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → host HID)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to inject input into the host.
///
/// Every delta reaching this trait has already been clamped to the
/// signed 8-bit HID range.
pub trait ActuatorPort {
    /// Relative pointer motion.
    fn pointer_move(&mut self, dx: i8, dy: i8);

    /// Press the buttons in `mask` (bit 0 = left, 1 = right, 2 = middle).
    fn button_press(&mut self, mask: u8);

    /// Release the buttons in `mask`.
    fn button_release(&mut self, mask: u8);

    /// One wheel report of `ticks` detents (negative scrolls down).
    fn wheel(&mut self, ticks: i8);

    /// Press a key by its key code (printable ASCII or a named control code).
    fn key_press(&mut self, code: u8);

    /// Release a key by its key code.
    fn key_release(&mut self, code: u8);

    /// Type a string literally, character by character.
    fn type_text(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: monotonic timers → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source. `now_ms` wraps at `u32::MAX`; every deadline
/// comparison in the core is wraparound-safe.
pub trait Clock {
    /// Milliseconds since boot, truncated to 32 bits.
    fn now_ms(&self) -> u32;

    /// Microseconds since boot. Only used as seed entropy.
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Tap source (driven adapter: physical button → domain)
// ───────────────────────────────────────────────────────────────

/// Event producer with exactly one capability: report a qualifying tap.
///
/// Contact debounce, long-press and multi-click handling belong to the
/// implementor. The toggle guard lives in the core.
pub trait TapSource {
    /// Sample the input. Returns `true` once per qualifying physical tap.
    fn poll_tap(&mut self, now_ms: u32) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Command source (driven adapter: transport → domain)
// ───────────────────────────────────────────────────────────────

/// Delivers already-decoded command records. Must not block.
pub trait CommandSource {
    /// Move every pending command into `queue`.
    fn poll(&mut self, queue: &mut CommandQueue);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → observers / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log,
/// WebSocket broadcast, status display).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
