//! Debounced toggle guard for the physical button.
//!
//! The sampler ([`TapSource`](super::ports::TapSource)) reports clicks; this
//! guard decides whether a click may toggle the simulation. A click less
//! than [`TOGGLE_DEBOUNCE_MS`] after the last accepted one is discarded
//! with no side effect.

/// Minimum spacing between two accepted toggles.
pub const TOGGLE_DEBOUNCE_MS: u32 = 250;

#[derive(Debug, Default)]
pub struct ButtonMonitor {
    /// Timestamp of the last accepted toggle. `None` until the first one.
    last_toggle_ms: Option<u32>,
}

impl ButtonMonitor {
    pub const fn new() -> Self {
        Self {
            last_toggle_ms: None,
        }
    }

    /// Offer a click at `now_ms`. Returns `true` if it qualifies as a
    /// toggle, in which case the timestamp is recorded.
    pub fn accept(&mut self, now_ms: u32) -> bool {
        if let Some(last) = self.last_toggle_ms {
            if now_ms.wrapping_sub(last) < TOGGLE_DEBOUNCE_MS {
                return false;
            }
        }
        self.last_toggle_ms = Some(now_ms);
        true
    }
}
