//! Key symbol resolution.
//!
//! Key codes follow the Arduino-style keyboard convention used by the HID
//! bridge: printable ASCII is its own code, named keys and modifiers sit
//! at `0x80` and above.

use super::commands::Modifiers;

// ── Modifier key codes ────────────────────────────────────────

pub const KEY_LEFT_CTRL: u8 = 0x80;
pub const KEY_LEFT_SHIFT: u8 = 0x81;
pub const KEY_LEFT_ALT: u8 = 0x82;
pub const KEY_LEFT_GUI: u8 = 0x83;

// ── Named key codes ───────────────────────────────────────────

pub const KEY_RETURN: u8 = 0xB0;
pub const KEY_ESC: u8 = 0xB1;
pub const KEY_BACKSPACE: u8 = 0xB2;
pub const KEY_TAB: u8 = 0xB3;
pub const KEY_CAPS_LOCK: u8 = 0xC1;
pub const KEY_F1: u8 = 0xC2;
pub const KEY_INSERT: u8 = 0xD1;
pub const KEY_HOME: u8 = 0xD2;
pub const KEY_PAGE_UP: u8 = 0xD3;
pub const KEY_DELETE: u8 = 0xD4;
pub const KEY_END: u8 = 0xD5;
pub const KEY_PAGE_DOWN: u8 = 0xD6;
pub const KEY_RIGHT_ARROW: u8 = 0xD7;
pub const KEY_LEFT_ARROW: u8 = 0xD8;
pub const KEY_DOWN_ARROW: u8 = 0xD9;
pub const KEY_UP_ARROW: u8 = 0xDA;

/// Named keys, matched case-insensitively. Several aliases per key so both
/// DOM `KeyboardEvent.key` values and short names work.
const NAMED_KEYS: &[(&str, u8)] = &[
    ("enter", KEY_RETURN),
    ("return", KEY_RETURN),
    ("escape", KEY_ESC),
    ("esc", KEY_ESC),
    ("backspace", KEY_BACKSPACE),
    ("tab", KEY_TAB),
    ("capslock", KEY_CAPS_LOCK),
    ("insert", KEY_INSERT),
    ("delete", KEY_DELETE),
    ("del", KEY_DELETE),
    ("home", KEY_HOME),
    ("end", KEY_END),
    ("pageup", KEY_PAGE_UP),
    ("pagedown", KEY_PAGE_DOWN),
    ("arrowup", KEY_UP_ARROW),
    ("up", KEY_UP_ARROW),
    ("arrowdown", KEY_DOWN_ARROW),
    ("down", KEY_DOWN_ARROW),
    ("arrowleft", KEY_LEFT_ARROW),
    ("left", KEY_LEFT_ARROW),
    ("arrowright", KEY_RIGHT_ARROW),
    ("right", KEY_RIGHT_ARROW),
    ("space", b' '),
];

/// Unshifted → shifted glyph on a US layout.
const SHIFT_SYMBOLS: &[(u8, u8)] = &[
    (b'1', b'!'),
    (b'2', b'@'),
    (b'3', b'#'),
    (b'4', b'$'),
    (b'5', b'%'),
    (b'6', b'^'),
    (b'7', b'&'),
    (b'8', b'*'),
    (b'9', b'('),
    (b'0', b')'),
    (b'-', b'_'),
    (b'=', b'+'),
    (b'[', b'{'),
    (b']', b'}'),
    (b'\\', b'|'),
    (b';', b':'),
    (b'\'', b'"'),
    (b',', b'<'),
    (b'.', b'>'),
    (b'/', b'?'),
    (b'`', b'~'),
];

/// What a key symbol resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press and release this key code.
    Code(u8),
    /// A single character with no key code; typed literally instead.
    Literal(char),
}

/// Resolve a key symbol under the given modifiers.
///
/// Single ASCII characters map to themselves, shift-mapped when shift is
/// held. `F1`–`F12` and the names in the table map to control codes. A
/// single non-ASCII character becomes [`KeyAction::Literal`]. Anything
/// else is unknown.
pub fn resolve(symbol: &str, modifiers: Modifiers) -> Option<KeyAction> {
    let mut chars = symbol.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii() {
            let code = ch as u8;
            return Some(KeyAction::Code(if modifiers.shift {
                shifted(code)
            } else {
                code
            }));
        }
        return Some(KeyAction::Literal(ch));
    }

    named(symbol).map(KeyAction::Code)
}

/// The glyph `code` produces with shift held. Letters are uppercased,
/// digits and punctuation follow the US layout, anything else is returned
/// unchanged.
pub fn shifted(code: u8) -> u8 {
    if code.is_ascii_lowercase() {
        return code.to_ascii_uppercase();
    }
    SHIFT_SYMBOLS
        .iter()
        .find(|(plain, _)| *plain == code)
        .map_or(code, |(_, shift)| *shift)
}

/// Control code for a named key, if known.
pub fn named(symbol: &str) -> Option<u8> {
    if let Some(n) = function_key(symbol) {
        return Some(n);
    }
    NAMED_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(symbol))
        .map(|(_, code)| *code)
}

fn function_key(symbol: &str) -> Option<u8> {
    let digits = symbol.strip_prefix(['F', 'f'])?;
    let n: u8 = digits.parse().ok()?;
    (1..=12).contains(&n).then(|| KEY_F1 + (n - 1))
}

/// Modifier key codes to hold, in press order (ctrl, shift, alt, gui).
/// Release in reverse.
pub fn modifier_codes(modifiers: Modifiers) -> heapless::Vec<u8, 4> {
    let mut codes = heapless::Vec::new();
    for (held, code) in [
        (modifiers.ctrl, KEY_LEFT_CTRL),
        (modifiers.shift, KEY_LEFT_SHIFT),
        (modifiers.alt, KEY_LEFT_ALT),
        (modifiers.meta, KEY_LEFT_GUI),
    ] {
        if held {
            // Capacity equals the number of modifiers; push cannot fail.
            let _ = codes.push(code);
        }
    }
    codes
}
