use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the three timer phases.
///
/// Serialized with the short names used in the persisted settings map
/// (`work`, `short`, `long`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "work")]
    Focus,
    #[serde(rename = "short")]
    ShortBreak,
    #[serde(rename = "long")]
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn is_focus(self) -> bool {
        self == Mode::Focus
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "focus" => Ok(Mode::Focus),
            "short" | "short-break" | "short_break" => Ok(Mode::ShortBreak),
            "long" | "long-break" | "long_break" => Ok(Mode::LongBreak),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}
