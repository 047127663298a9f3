//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full injection
//! history without a USB host attached.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};
use scrollpilot::app::commands::Command;
use scrollpilot::app::events::AppEvent;
use scrollpilot::app::ports::{ActuatorPort, Clock, EventSink};
use scrollpilot::app::service::AppService;
use scrollpilot::config::DeviceConfig;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Move { dx: i8, dy: i8 },
    Press(u8),
    Release(u8),
    Wheel(i8),
    KeyDown(u8),
    KeyUp(u8),
    Type(String),
    DelayMs(u32),
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wheel_ticks(&self) -> Vec<i8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Wheel(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ActuatorPort for MockHardware {
    fn pointer_move(&mut self, dx: i8, dy: i8) {
        self.calls.push(ActuatorCall::Move { dx, dy });
    }

    fn button_press(&mut self, mask: u8) {
        self.calls.push(ActuatorCall::Press(mask));
    }

    fn button_release(&mut self, mask: u8) {
        self.calls.push(ActuatorCall::Release(mask));
    }

    fn wheel(&mut self, ticks: i8) {
        self.calls.push(ActuatorCall::Wheel(ticks));
    }

    fn key_press(&mut self, code: u8) {
        self.calls.push(ActuatorCall::KeyDown(code));
    }

    fn key_release(&mut self, code: u8) {
        self.calls.push(ActuatorCall::KeyUp(code));
    }

    fn type_text(&mut self, text: &str) {
        self.calls.push(ActuatorCall::Type(text.to_owned()));
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ActuatorCall::DelayMs(ms));
    }
}

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock {
    ms: Cell<u32>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn at(ms: u32) -> Self {
        Self { ms: Cell::new(ms) }
    }

    pub fn set(&self, ms: u32) {
        self.ms.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.ms.set(self.ms.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.ms.get()
    }

    fn now_us(&self) -> u64 {
        u64::from(self.ms.get()) * 1000 + 17
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&AppEvent> {
        self.events.last()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockPin ───────────────────────────────────────────────────

/// Active-low button pin whose level the test flips through a shared cell.
#[derive(Clone, Default)]
pub struct MockPin {
    pub pressed: Rc<Cell<bool>>,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.get())
    }
}

// ── Harness ───────────────────────────────────────────────────

pub struct Rig {
    pub app: AppService,
    pub hw: MockHardware,
    pub sink: LogSink,
    pub clock: MockClock,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(DeviceConfig::default())
    }

    pub fn with_config(config: DeviceConfig) -> Self {
        let mut sink = LogSink::new();
        let mut app = AppService::new(config, 0x0011_22AA_BBCC);
        app.start(&mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            sink,
            clock: MockClock::at(1_000),
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        self.app
            .dispatch(command, &self.clock, &mut self.hw, &mut self.sink);
    }

    pub fn tick(&mut self) {
        self.app.tick(&self.clock, &mut self.hw, &mut self.sink);
    }

    pub fn tap(&mut self) {
        self.app.on_button_tap(&self.clock, &mut self.sink);
    }
}
