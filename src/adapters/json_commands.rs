//! JSON wire adapter.
//!
//! Decodes the text messages sent by the control page into [`Command`]
//! records and renders the simulation snapshot notification that goes
//! back to clients.
//!
//! ```text
//! {"type":"scroll","steps":-2}            → Command::Scroll { steps: -2 }
//! {"type":"key","key":"c","ctrl":true}    → Command::Key { .. }
//! {"type":"simulation","cmd":"get"}       → Command::Simulation { .. }
//! ```

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::app::commands::Command;
use crate::app::events::SimSnapshot;
use crate::error::DecodeError;

/// Largest text message accepted from a client.
pub const MAX_MESSAGE_LEN: usize = 1024;

/// Decode one text message.
///
/// The `type` tag is checked against [`Command::KINDS`] before any field is
/// looked at, so a bad value inside a known message is an invalid field,
/// never an unknown type.
pub fn decode_command(text: &str) -> Result<Command, DecodeError> {
    if text.len() > MAX_MESSAGE_LEN {
        return Err(DecodeError::TooLarge);
    }
    let value: Value = serde_json::from_str(text).map_err(|e| reject(DecodeError::Syntax, &e))?;

    let kind = value.get("type").and_then(Value::as_str);
    if !kind.is_some_and(|k| Command::KINDS.contains(&k)) {
        warn!("wire: rejected message ({}): {:?}", DecodeError::UnknownType, kind);
        return Err(DecodeError::UnknownType);
    }

    serde_json::from_value(value).map_err(|e| reject(DecodeError::InvalidField, &e))
}

fn reject(err: DecodeError, cause: &serde_json::Error) -> DecodeError {
    warn!("wire: rejected message ({}): {}", err, cause);
    err
}

#[derive(Serialize)]
struct SimulationNotice {
    #[serde(rename = "type")]
    kind: &'static str,
    active: bool,
    speed: u8,
}

/// `{"type":"simulation","active":…,"speed":…}`
pub fn snapshot_json(snapshot: SimSnapshot) -> String {
    let notice = SimulationNotice {
        kind: "simulation",
        active: snapshot.active,
        speed: snapshot.speed,
    };
    // Serialising a flat struct of primitives cannot fail.
    serde_json::to_string(&notice).unwrap_or_default()
}
