//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements         | Connects to                  |
//! |-----------------|--------------------|------------------------------|
//! | `hid`           | ActuatorPort       | USB-HID bridge (UART) / log  |
//! | `json_commands` | —                  | WebSocket / console text     |
//! | `log_sink`      | EventSink          | Serial log output            |
//! | `time`          | Clock              | ESP32 system timer           |
//! | `device_id`     | —                  | eFuse factory MAC            |
//!
//! The button sampler lives in [`crate::drivers::button`] and implements
//! `TapSource` directly.

pub mod device_id;
pub mod hid;
pub mod json_commands;
pub mod log_sink;
pub mod time;
