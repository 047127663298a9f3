//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the logger
//! (UART / USB-CDC on the device). A WebSocket broadcaster would implement
//! the same trait and push [`snapshot_json`] to clients.

use log::{debug, info};

use crate::adapters::json_commands::snapshot_json;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(s) => {
                info!("START | {}", snapshot_json(*s));
            }
            AppEvent::SimulationChanged(s) | AppEvent::SnapshotRequested(s) => {
                info!("SIM   | {}", snapshot_json(*s));
            }
            AppEvent::PhaseChanged { from, to } => {
                debug!("PHASE | {:?} -> {:?}", from, to);
            }
            AppEvent::SettingsUpdated => {
                info!("CONF  | settings replaced");
            }
        }
    }
}
