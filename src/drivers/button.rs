//! Polled, debounced button driver with click and long-press detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up. The main loop samples the pin
//! once per iteration through [`ButtonDriver::poll`]; a raw level must stay
//! unchanged for [`DEBOUNCE_MS`] before the driver believes it.
//!
//! ## Gesture detection
//!
//! | Gesture    | Condition                       | Event                   |
//! |------------|---------------------------------|-------------------------|
//! | Click      | Release after a hold < 1 s      | `ButtonEvent::Click`     |
//! | Long press | Hold reaches 1 s                | `ButtonEvent::LongPress` |
//!
//! A long press is reported once, while still held, and the following
//! release is swallowed. Only clicks count as taps for the application.

use embedded_hal::digital::InputPin;
use log::{debug, warn};

use crate::app::ports::TapSource;

pub const DEBOUNCE_MS: u32 = 50;
pub const LONG_PRESS_MS: u32 = 1000;

/// Button events emitted after gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Click,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Released,
    Pressed { since_ms: u32 },
    /// Long press already reported; waiting for release.
    Held,
}

/// Pin-independent debounce + gesture state machine.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    state: GestureState,
    /// Raw level seen on the last sample and when it was first seen.
    raw_pressed: bool,
    raw_since_ms: u32,
    /// Debounced level.
    stable_pressed: bool,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector {
    pub const fn new() -> Self {
        Self {
            state: GestureState::Released,
            raw_pressed: false,
            raw_since_ms: 0,
            stable_pressed: false,
        }
    }

    /// Feed one raw sample (`true` = pressed). Returns a classified gesture,
    /// if one completed on this sample.
    pub fn sample(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        if pressed != self.raw_pressed {
            self.raw_pressed = pressed;
            self.raw_since_ms = now_ms;
        }

        if self.raw_pressed != self.stable_pressed
            && now_ms.wrapping_sub(self.raw_since_ms) >= DEBOUNCE_MS
        {
            self.stable_pressed = self.raw_pressed;
            if let Some(event) = self.on_edge() {
                return Some(event);
            }
        }

        // A release still being debounced was timestamped at its raw edge.
        if let (GestureState::Pressed { since_ms }, true) = (self.state, self.raw_pressed) {
            if now_ms.wrapping_sub(since_ms) >= LONG_PRESS_MS {
                self.state = GestureState::Held;
                return Some(ButtonEvent::LongPress);
            }
        }
        None
    }

    /// Both press and release are timestamped at their first raw edge.
    fn on_edge(&mut self) -> Option<ButtonEvent> {
        match (self.state, self.stable_pressed) {
            (GestureState::Released, true) => {
                self.state = GestureState::Pressed {
                    since_ms: self.raw_since_ms,
                };
                None
            }
            (GestureState::Pressed { since_ms }, false) => {
                self.state = GestureState::Released;
                (self.raw_since_ms.wrapping_sub(since_ms) < LONG_PRESS_MS)
                    .then_some(ButtonEvent::Click)
            }
            (GestureState::Held, false) => {
                self.state = GestureState::Released;
                None
            }
            _ => None,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Pin-backed driver
// ───────────────────────────────────────────────────────────────

pub struct ButtonDriver<P> {
    pin: P,
    detector: GestureDetector,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            detector: GestureDetector::new(),
        }
    }

    /// Sample the pin once. A read error counts as released.
    pub fn poll(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        let pressed = match self.pin.is_low() {
            Ok(level) => level,
            Err(_) => {
                warn!("button: pin read failed");
                false
            }
        };
        let event = self.detector.sample(pressed, now_ms);
        if let Some(ev) = event {
            debug!("button: {:?}", ev);
        }
        event
    }
}

impl<P: InputPin> TapSource for ButtonDriver<P> {
    fn poll_tap(&mut self, now_ms: u32) -> bool {
        self.poll(now_ms) == Some(ButtonEvent::Click)
    }
}
