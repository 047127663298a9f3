//! Unified error types for the ScrollPilot firmware.
//!
//! The command core never fails: out-of-range input is clamped or ignored.
//! These types cover the adapter ring only. HID and decode errors are
//! logged and dropped where they occur; [`Error`] is reserved for bring-up
//! failures that abort boot. All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Fatal bring-up failure; the firmware cannot enter its control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// HID transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidError {
    /// Report write to the link failed.
    WriteFailed,
    /// Link accepted only part of the report.
    ShortWrite,
}

impl fmt::Display for HidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "report write failed"),
            Self::ShortWrite => write!(f, "short report write"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire decode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is not valid JSON.
    Syntax,
    /// JSON is well-formed but has no recognised `type`.
    UnknownType,
    /// A field has the wrong shape (e.g. a string where a number belongs).
    InvalidField,
    /// Payload exceeds the accepted message size.
    TooLarge,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "malformed JSON"),
            Self::UnknownType => write!(f, "unknown message type"),
            Self::InvalidField => write!(f, "invalid field"),
            Self::TooLarge => write!(f, "message too large"),
        }
    }
}
