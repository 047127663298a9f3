//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the command rules for the device: dispatch of
//! pointer/keyboard/scroll commands, the button toggle guard, and the
//! shared actuation paths. All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod actuation;
pub mod button;
pub mod commands;
pub mod events;
pub mod keymap;
pub mod ports;
pub mod service;
