//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the simulation engine, the button toggle guard and
//! the live settings snapshot. It routes every command record to the
//! actuator facade or to the simulator, and is driven once per loop
//! iteration by the control loop.
//!
//! ```text
//!  CommandQueue ──▶ ┌────────────────────────┐ ──▶ EventSink
//!     TapSource ──▶ │       AppService       │
//!                   │ dispatch · toggle · sim│ ──▶ ActuatorPort
//!                   └────────────────────────┘
//! ```
//!
//! Nothing here suspends. The only blocking call is the 10 ms hold inside
//! a click.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::DeviceConfig;
use crate::rng::seed_material;
use crate::sim::SimulationEngine;

use super::actuation::{apply_scroll_steps, click, move_pointer};
use super::button::ButtonMonitor;
use super::commands::{BUTTON_LEFT, Command, Modifiers, SimRequest};
use super::events::{AppEvent, SimSnapshot};
use super::keymap::{self, KeyAction};
use super::ports::{ActuatorPort, Clock, EventSink};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    sim: SimulationEngine,
    button: ButtonMonitor,
    settings: DeviceConfig,
    /// Factory-unique identifier folded into the generator seed.
    hardware_id: u64,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration. The simulation starts
    /// inactive at the configured speed.
    pub fn new(config: DeviceConfig, hardware_id: u64) -> Self {
        let settings = config.sanitized();
        Self {
            sim: SimulationEngine::new(settings.sim_speed),
            button: ButtonMonitor::new(),
            settings,
            hardware_id,
            tick_count: 0,
        }
    }

    /// Announce the initial snapshot.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let snapshot = self.snapshot();
        sink.emit(&AppEvent::Started(snapshot));
        info!("AppService started (sim speed {})", snapshot.speed);
    }

    // ── Command handling ──────────────────────────────────────

    /// Route one decoded command record.
    pub fn dispatch(
        &mut self,
        command: Command,
        clock: &impl Clock,
        hw: &mut (impl ActuatorPort + DelayNs),
        sink: &mut impl EventSink,
    ) {
        debug!("dispatch: {}", command.kind());
        match command {
            Command::Move { dx, dy } => {
                move_pointer(hw, dx, dy, self.settings.pointer_sensitivity);
            }
            Command::Click { button } => click(hw, button),
            Command::Tap => {
                if self.settings.tap_to_click {
                    click(hw, BUTTON_LEFT);
                }
            }
            Command::Scroll { steps } => {
                apply_scroll_steps(hw, steps, self.settings.scroll_sensitivity);
            }
            Command::Key { key, modifiers } => press_key(hw, &key, modifiers),
            Command::Text { text } => hw.type_text(&unescape_newlines(&text)),
            Command::Simulation { active, speed, cmd } => {
                if cmd == Some(SimRequest::Get) {
                    sink.emit(&AppEvent::SnapshotRequested(self.snapshot()));
                    return;
                }
                if let Some(speed) = speed {
                    self.sim.set_speed(speed);
                }
                match active {
                    Some(true) => self.start_simulation(clock),
                    Some(false) => self.sim.stop(),
                    None => {}
                }
                sink.emit(&AppEvent::SimulationChanged(self.snapshot()));
            }
            Command::Settings(config) => {
                self.settings = config.sanitized();
                info!(
                    "settings: tap={} pointer={:.2} scroll={:.2}",
                    self.settings.tap_to_click,
                    self.settings.pointer_sensitivity,
                    self.settings.scroll_sensitivity
                );
                sink.emit(&AppEvent::SettingsUpdated);
            }
        }
    }

    /// A qualifying physical tap arrived from the button sampler.
    /// Toggles the simulation unless inside the debounce window.
    pub fn on_button_tap(&mut self, clock: &impl Clock, sink: &mut impl EventSink) {
        if !self.button.accept(clock.now_ms()) {
            debug!("button: tap inside debounce window ignored");
            return;
        }
        if self.sim.is_active() {
            info!("button: stop simulation");
            self.sim.stop();
        } else {
            info!("button: start simulation");
            self.start_simulation(clock);
        }
        sink.emit(&AppEvent::SimulationChanged(self.snapshot()));
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Advance the simulation by one loop iteration.
    pub fn tick(
        &mut self,
        clock: &impl Clock,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if let Some((from, to)) =
            self.sim
                .tick(clock.now_ms(), self.settings.scroll_sensitivity, hw)
        {
            sink.emit(&AppEvent::PhaseChanged { from, to });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// `{active, speed}` for observers.
    pub fn snapshot(&self) -> SimSnapshot {
        self.sim.snapshot()
    }

    /// Read access to the simulator (phase, run state).
    pub fn simulation(&self) -> &SimulationEngine {
        &self.sim
    }

    /// The live settings snapshot.
    pub fn settings(&self) -> &DeviceConfig {
        &self.settings
    }

    /// Loop iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn start_simulation(&mut self, clock: &impl Clock) {
        let now_ms = clock.now_ms();
        let material = seed_material(now_ms, clock.now_us(), self.hardware_id);
        self.sim.start(now_ms, material);
    }
}

/// Hold modifiers, tap the resolved key, release modifiers in reverse.
/// Unknown key names produce no actuation at all.
fn press_key(hw: &mut impl ActuatorPort, symbol: &str, modifiers: Modifiers) {
    let Some(action) = keymap::resolve(symbol, modifiers) else {
        debug!("key: unknown symbol '{}'", symbol);
        return;
    };

    let held = keymap::modifier_codes(modifiers);
    for &code in &held {
        hw.key_press(code);
    }

    match action {
        KeyAction::Code(code) => {
            hw.key_press(code);
            hw.key_release(code);
        }
        KeyAction::Literal(ch) => {
            let mut buf = [0u8; 4];
            hw.type_text(ch.encode_utf8(&mut buf));
        }
    }

    for &code in held.iter().rev() {
        hw.key_release(code);
    }
}

/// Expand the two-character escape `\n` into a newline.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
