//! Fuzz target: `decode_command`
//!
//! Drives arbitrary text into the JSON command decoder and dispatches
//! whatever it accepts into a service backed by a null actuator. Neither
//! step may panic, and every decoded record must survive dispatch.
//!
//! cargo fuzz run fuzz_command_decode

#![no_main]

use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;
use scrollpilot::adapters::json_commands::decode_command;
use scrollpilot::app::events::AppEvent;
use scrollpilot::app::ports::{ActuatorPort, Clock, EventSink};
use scrollpilot::app::service::AppService;
use scrollpilot::config::DeviceConfig;

struct Null;

impl ActuatorPort for Null {
    fn pointer_move(&mut self, _dx: i8, _dy: i8) {}
    fn button_press(&mut self, _mask: u8) {}
    fn button_release(&mut self, _mask: u8) {}
    fn wheel(&mut self, _ticks: i8) {}
    fn key_press(&mut self, _code: u8) {}
    fn key_release(&mut self, _code: u8) {}
    fn type_text(&mut self, _text: &str) {}
}

impl DelayNs for Null {
    fn delay_ns(&mut self, _ns: u32) {}
}

impl EventSink for Null {
    fn emit(&mut self, _event: &AppEvent) {}
}

struct FixedClock;

impl Clock for FixedClock {
    fn now_ms(&self) -> u32 {
        12_345
    }

    fn now_us(&self) -> u64 {
        12_345_678
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(cmd) = decode_command(text) {
        let mut app = AppService::new(DeviceConfig::default(), 0);
        let mut hw = Null;
        let mut sink = Null;
        app.dispatch(cmd, &FixedClock, &mut hw, &mut sink);
        app.tick(&FixedClock, &mut hw, &mut sink);
        assert!((1..=20).contains(&app.snapshot().speed));
    }
});
