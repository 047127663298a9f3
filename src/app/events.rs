//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port after every state-affecting
//! call. Adapters on the other side decide what to do with them — log to
//! serial, broadcast to connected clients, refresh the status display.

use serde::Serialize;

use crate::sim::Phase;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the initial snapshot).
    Started(SimSnapshot),

    /// Simulation was started, stopped or re-paced.
    SimulationChanged(SimSnapshot),

    /// A client asked for the current snapshot.
    SnapshotRequested(SimSnapshot),

    /// The simulation moved between pause and burst.
    PhaseChanged { from: Phase, to: Phase },

    /// The settings snapshot was replaced.
    SettingsUpdated,
}

/// Observer-facing view of the simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimSnapshot {
    pub active: bool,
    pub speed: u8,
}
