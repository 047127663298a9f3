//! HID adapter — turns actuator calls into boot-protocol reports.
//!
//! Implements [`ActuatorPort`] over a [`HidTransport`]. This is the only
//! module that knows about report layouts and HID usage IDs; the core
//! speaks in key codes and clamped deltas.
//!
//! ```text
//!  mouse    [buttons, x, y, wheel]                      4 bytes
//!  keyboard [modifiers, 0, k1, k2, k3, k4, k5, k6]      8 bytes
//! ```
//!
//! Transport failures are logged and swallowed; a lost report is a
//! silent non-actuation.

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::app::ports::ActuatorPort;
use crate::error::HidError;

// ───────────────────────────────────────────────────────────────
// Reports
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseReport {
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
}

impl MouseReport {
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.buttons, self.x as u8, self.y as u8, self.wheel as u8]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardReport {
    pub modifiers: u8,
    pub keys: [u8; 6],
}

impl KeyboardReport {
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[0] = self.modifiers;
        out[2..].copy_from_slice(&self.keys);
        out
    }
}

/// Host-facing link that carries finished reports.
pub trait HidTransport {
    fn send_mouse(&mut self, report: &MouseReport) -> Result<(), HidError>;
    fn send_keyboard(&mut self, report: &KeyboardReport) -> Result<(), HidError>;
}

// ───────────────────────────────────────────────────────────────
// Key code → HID usage
// ───────────────────────────────────────────────────────────────

const MOD_LEFT_SHIFT: u8 = 0x02;

/// First named-key code; `code − NAMED_KEY_OFFSET` is the HID usage.
const NAMED_KEY_OFFSET: u8 = 0x88;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Usage {
    /// Modifier byte bit.
    Modifier(u8),
    /// Key slot usage, plus whether the glyph needs shift.
    Key { usage: u8, shift: bool },
}

fn usage_for(code: u8) -> Option<Usage> {
    match code {
        0x80..=0x87 => Some(Usage::Modifier(1 << (code - 0x80))),
        NAMED_KEY_OFFSET..=0xFF => Some(Usage::Key {
            usage: code - NAMED_KEY_OFFSET,
            shift: false,
        }),
        _ => ascii_usage(code).map(|(usage, shift)| Usage::Key { usage, shift }),
    }
}

/// US-layout usage for a printable ASCII byte (plus `\n`, `\t`, backspace).
pub fn ascii_usage(c: u8) -> Option<(u8, bool)> {
    let plain = |u| Some((u, false));
    let shifted = |u| Some((u, true));
    match c {
        b'a'..=b'z' => plain(0x04 + (c - b'a')),
        b'A'..=b'Z' => shifted(0x04 + (c - b'A')),
        b'1'..=b'9' => plain(0x1E + (c - b'1')),
        b'0' => plain(0x27),
        b'\n' => plain(0x28),
        0x08 => plain(0x2A),
        b'\t' => plain(0x2B),
        b' ' => plain(0x2C),
        b'-' => plain(0x2D),
        b'=' => plain(0x2E),
        b'[' => plain(0x2F),
        b']' => plain(0x30),
        b'\\' => plain(0x31),
        b';' => plain(0x33),
        b'\'' => plain(0x34),
        b'`' => plain(0x35),
        b',' => plain(0x36),
        b'.' => plain(0x37),
        b'/' => plain(0x38),
        b'!' => shifted(0x1E),
        b'@' => shifted(0x1F),
        b'#' => shifted(0x20),
        b'$' => shifted(0x21),
        b'%' => shifted(0x22),
        b'^' => shifted(0x23),
        b'&' => shifted(0x24),
        b'*' => shifted(0x25),
        b'(' => shifted(0x26),
        b')' => shifted(0x27),
        b'_' => shifted(0x2D),
        b'+' => shifted(0x2E),
        b'{' => shifted(0x2F),
        b'}' => shifted(0x30),
        b'|' => shifted(0x31),
        b':' => shifted(0x33),
        b'"' => shifted(0x34),
        b'~' => shifted(0x35),
        b'<' => shifted(0x36),
        b'>' => shifted(0x37),
        b'?' => shifted(0x38),
        _ => None,
    }
}

// ───────────────────────────────────────────────────────────────
// Adapter
// ───────────────────────────────────────────────────────────────

/// Concrete [`ActuatorPort`] that keeps mouse button and keyboard state
/// and pushes a report on every change.
pub struct HidAdapter<T, D> {
    transport: T,
    delay: D,
    buttons: u8,
    keyboard: KeyboardReport,
    /// Shift implied by the currently held glyph, kept apart from an
    /// explicitly held shift key.
    glyph_shift: bool,
    failures: u32,
}

impl<T: HidTransport, D: DelayNs> HidAdapter<T, D> {
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            transport,
            delay,
            buttons: 0,
            keyboard: KeyboardReport::default(),
            glyph_shift: false,
            failures: 0,
        }
    }

    /// Reports the transport refused since boot.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send_mouse(&mut self, x: i8, y: i8, wheel: i8) {
        let report = MouseReport {
            buttons: self.buttons,
            x,
            y,
            wheel,
        };
        if let Err(e) = self.transport.send_mouse(&report) {
            self.failures = self.failures.wrapping_add(1);
            warn!("hid: mouse report dropped: {}", e);
        }
    }

    fn send_keyboard(&mut self) {
        let mut report = self.keyboard;
        if self.glyph_shift {
            report.modifiers |= MOD_LEFT_SHIFT;
        }
        if let Err(e) = self.transport.send_keyboard(&report) {
            self.failures = self.failures.wrapping_add(1);
            warn!("hid: keyboard report dropped: {}", e);
        }
    }
}

impl<T: HidTransport, D: DelayNs> ActuatorPort for HidAdapter<T, D> {
    fn pointer_move(&mut self, dx: i8, dy: i8) {
        self.send_mouse(dx, dy, 0);
    }

    fn button_press(&mut self, mask: u8) {
        self.buttons |= mask;
        self.send_mouse(0, 0, 0);
    }

    fn button_release(&mut self, mask: u8) {
        self.buttons &= !mask;
        self.send_mouse(0, 0, 0);
    }

    fn wheel(&mut self, ticks: i8) {
        self.send_mouse(0, 0, ticks);
    }

    fn key_press(&mut self, code: u8) {
        match usage_for(code) {
            Some(Usage::Modifier(bit)) => self.keyboard.modifiers |= bit,
            Some(Usage::Key { usage, shift }) => {
                if self.keyboard.keys.contains(&usage) {
                    return;
                }
                let Some(slot) = self.keyboard.keys.iter_mut().find(|k| **k == 0) else {
                    debug!("hid: six keys already held, 0x{:02X} ignored", code);
                    return;
                };
                *slot = usage;
                self.glyph_shift = shift;
            }
            None => {
                debug!("hid: no usage for code 0x{:02X}", code);
                return;
            }
        }
        self.send_keyboard();
    }

    fn key_release(&mut self, code: u8) {
        match usage_for(code) {
            Some(Usage::Modifier(bit)) => self.keyboard.modifiers &= !bit,
            Some(Usage::Key { usage, shift }) => {
                for k in self.keyboard.keys.iter_mut().filter(|k| **k == usage) {
                    *k = 0;
                }
                if shift {
                    self.glyph_shift = false;
                }
            }
            None => return,
        }
        self.send_keyboard();
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let code = match u8::try_from(ch) {
                Ok(code) if ascii_usage(code).is_some() => code,
                _ => {
                    debug!("hid: no usage for '{}'", ch.escape_default());
                    continue;
                }
            };
            self.key_press(code);
            self.key_release(code);
        }
    }
}

impl<T, D: DelayNs> DelayNs for HidAdapter<T, D> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

// ───────────────────────────────────────────────────────────────
// Transports
// ───────────────────────────────────────────────────────────────

/// Host-side transport: logs every report instead of sending it.
#[derive(Debug, Default)]
pub struct LogHidTransport {
    sent: u32,
}

impl LogHidTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl HidTransport for LogHidTransport {
    fn send_mouse(&mut self, report: &MouseReport) -> Result<(), HidError> {
        self.sent = self.sent.wrapping_add(1);
        debug!("HID mouse    {:02X?}", report.to_bytes());
        Ok(())
    }

    fn send_keyboard(&mut self, report: &KeyboardReport) -> Result<(), HidError> {
        self.sent = self.sent.wrapping_add(1);
        debug!("HID keyboard {:02X?}", report.to_bytes());
        Ok(())
    }
}

/// Serial framing for the USB-HID bridge:
/// `[SYNC, kind, len, payload…, xor-checksum]`.
pub mod frame {
    pub const SYNC: u8 = 0xFD;
    pub const KIND_MOUSE: u8 = 0x01;
    pub const KIND_KEYBOARD: u8 = 0x02;
    /// Largest frame: 8-byte keyboard payload plus 4 framing bytes.
    pub const MAX_FRAME: usize = 12;

    /// Encode one frame into `out`, returning the used length.
    pub fn encode(kind: u8, payload: &[u8], out: &mut [u8; MAX_FRAME]) -> usize {
        let len = payload.len().min(MAX_FRAME - 4);
        out[0] = SYNC;
        out[1] = kind;
        out[2] = len as u8;
        out[3..3 + len].copy_from_slice(&payload[..len]);
        out[3 + len] = payload[..len].iter().fold(kind ^ len as u8, |acc, b| acc ^ b);
        4 + len
    }
}

#[cfg(target_os = "espidf")]
pub use uart::UartHidTransport;

#[cfg(target_os = "espidf")]
mod uart {
    use esp_idf_hal::uart::UartDriver;

    use super::{frame, HidTransport, KeyboardReport, MouseReport};
    use crate::error::HidError;

    /// UART link to a USB-HID bridge chip.
    pub struct UartHidTransport<'d> {
        uart: UartDriver<'d>,
    }

    impl<'d> UartHidTransport<'d> {
        pub fn new(uart: UartDriver<'d>) -> Self {
            Self { uart }
        }

        fn send(&mut self, kind: u8, payload: &[u8]) -> Result<(), HidError> {
            let mut buf = [0u8; frame::MAX_FRAME];
            let len = frame::encode(kind, payload, &mut buf);
            match self.uart.write(&buf[..len]) {
                Ok(n) if n == len => Ok(()),
                Ok(_) => Err(HidError::ShortWrite),
                Err(_) => Err(HidError::WriteFailed),
            }
        }
    }

    impl HidTransport for UartHidTransport<'_> {
        fn send_mouse(&mut self, report: &MouseReport) -> Result<(), HidError> {
            self.send(frame::KIND_MOUSE, &report.to_bytes())
        }

        fn send_keyboard(&mut self, report: &KeyboardReport) -> Result<(), HidError> {
            self.send(frame::KIND_KEYBOARD, &report.to_bytes())
        }
    }
}
