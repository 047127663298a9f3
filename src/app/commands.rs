//! Inbound command records.
//!
//! These represent actions requested by the outside world (control page,
//! WebSocket clients) after the transport has decoded them. One variant per
//! command kind; absent optional fields take the defaults noted on each.

use serde::Deserialize;

use crate::config::DeviceConfig;

/// Primary (left) mouse button.
pub const BUTTON_LEFT: u8 = 0b001;
/// Secondary (right) mouse button.
pub const BUTTON_RIGHT: u8 = 0b010;
/// Middle mouse button.
pub const BUTTON_MIDDLE: u8 = 0b100;

/// Longest named key accepted (e.g. `"PageDown"`).
pub const MAX_KEY_SYMBOL: usize = 16;

/// Key symbol: a single character or a key name.
pub type KeySymbol = heapless::String<MAX_KEY_SYMBOL>;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Relative pointer motion, scaled by pointer sensitivity.
    Move { dx: i32, dy: i32 },

    /// Press and release a button mask. Defaults to the left button.
    Click { button: u8 },

    /// Touchpad tap; clicks only when tap-to-click is enabled.
    Tap,

    /// Manual wheel steps (negative scrolls down).
    Scroll { steps: i32 },

    /// A key with optional modifiers held around it.
    Key { key: KeySymbol, modifiers: Modifiers },

    /// Literal text; `\n` escape sequences are expanded before typing.
    Text { text: String },

    /// Simulation control: speed, start/stop, or a snapshot request.
    Simulation {
        active: Option<bool>,
        speed: Option<i32>,
        cmd: Option<SimRequest>,
    },

    /// Replace the settings snapshot (last writer wins).
    Settings(DeviceConfig),
}

/// Wire shape of [`Command`]. Key modifier flags sit beside `key` in the
/// same object.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireCommand {
    Move {
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dy: i32,
    },
    Click {
        #[serde(default = "default_button")]
        button: u8,
    },
    Tap,
    Scroll {
        #[serde(default)]
        steps: i32,
    },
    Key {
        #[serde(default)]
        key: KeySymbol,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default, alias = "gui")]
        meta: bool,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    Simulation {
        #[serde(default)]
        active: Option<bool>,
        #[serde(default)]
        speed: Option<i32>,
        #[serde(default)]
        cmd: Option<SimRequest>,
    },
    Settings(DeviceConfig),
}

impl From<WireCommand> for Command {
    fn from(wire: WireCommand) -> Self {
        match wire {
            WireCommand::Move { dx, dy } => Self::Move { dx, dy },
            WireCommand::Click { button } => Self::Click { button },
            WireCommand::Tap => Self::Tap,
            WireCommand::Scroll { steps } => Self::Scroll { steps },
            WireCommand::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => Self::Key {
                key,
                modifiers: Modifiers {
                    ctrl,
                    shift,
                    alt,
                    meta,
                },
            },
            WireCommand::Text { text } => Self::Text { text },
            WireCommand::Simulation { active, speed, cmd } => {
                Self::Simulation { active, speed, cmd }
            }
            WireCommand::Settings(cfg) => Self::Settings(cfg),
        }
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireCommand::deserialize(deserializer).map(Self::from)
    }
}

/// Modifier keys requested alongside a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Windows / Command key.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// Sub-command carried by [`Command::Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimRequest {
    /// Report the current snapshot without changing anything.
    Get,
}

const fn default_button() -> u8 {
    BUTTON_LEFT
}

impl Command {
    /// Every `type` tag the wire format accepts.
    pub const KINDS: [&'static str; 8] = [
        "move",
        "click",
        "tap",
        "scroll",
        "key",
        "text",
        "simulation",
        "settings",
    ];

    /// Build a key command from a symbol, truncating names that do not fit.
    pub fn key(symbol: &str, modifiers: Modifiers) -> Self {
        let mut key = KeySymbol::new();
        for ch in symbol.chars() {
            if key.push(ch).is_err() {
                break;
            }
        }
        Self::Key { key, modifiers }
    }

    /// Short, stable name of the variant for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Click { .. } => "click",
            Self::Tap => "tap",
            Self::Scroll { .. } => "scroll",
            Self::Key { .. } => "key",
            Self::Text { .. } => "text",
            Self::Simulation { .. } => "simulation",
            Self::Settings(_) => "settings",
        }
    }
}
