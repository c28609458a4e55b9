//! Per-mode duration settings.
//!
//! Every mode always has a duration, and every duration is a whole number of
//! minutes in [`MIN_MINUTES`]..=[`MAX_MINUTES`]. Fields are private so the
//! only way to build a `Settings` is through a validating path.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::Mode;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 120;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct Settings {
    work: u32,
    short: u32,
    long: u32,
}

/// Unvalidated wire form.
#[derive(Deserialize)]
struct RawSettings {
    work: i64,
    short: i64,
    long: i64,
}

impl TryFrom<RawSettings> for Settings {
    type Error = ValidationError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            work: validate(Mode::Focus, raw.work)?,
            short: validate(Mode::ShortBreak, raw.short)?,
            long: validate(Mode::LongBreak, raw.long)?,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work: DEFAULT_FOCUS_MINUTES,
            short: DEFAULT_SHORT_BREAK_MINUTES,
            long: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}

impl Settings {
    /// Build settings from three durations, all of which must be in range.
    ///
    /// # Errors
    /// Returns the first field that fails validation.
    pub fn new(work: i64, short: i64, long: i64) -> Result<Self, ValidationError> {
        RawSettings { work, short, long }.try_into()
    }

    /// Duration in minutes for `mode`.
    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.work,
            Mode::ShortBreak => self.short,
            Mode::LongBreak => self.long,
        }
    }

    /// Duration in seconds for `mode`.
    pub fn seconds(&self, mode: Mode) -> u64 {
        u64::from(self.minutes(mode)) * 60
    }

    /// Apply a single-field edit.
    ///
    /// An out-of-range value is refused and the previous value is kept.
    pub fn update(&mut self, mode: Mode, value: i64) -> Result<(), ValidationError> {
        let minutes = validate(mode, value)?;
        *self.slot_mut(mode) = minutes;
        Ok(())
    }

    /// Apply a single-field edit from user text.
    ///
    /// The text must be a plain decimal integer (surrounding whitespace is
    /// ignored). Anything else is refused and the previous value is kept.
    pub fn update_from_str(&mut self, mode: Mode, input: &str) -> Result<(), ValidationError> {
        let value = input
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NotANumber {
                mode,
                input: input.to_string(),
            })?;
        self.update(mode, value)
    }

    fn slot_mut(&mut self, mode: Mode) -> &mut u32 {
        match mode {
            Mode::Focus => &mut self.work,
            Mode::ShortBreak => &mut self.short,
            Mode::LongBreak => &mut self.long,
        }
    }
}

fn validate(mode: Mode, value: i64) -> Result<u32, ValidationError> {
    if (i64::from(MIN_MINUTES)..=i64::from(MAX_MINUTES)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(ValidationError::DurationOutOfRange {
            mode,
            value,
            min: MIN_MINUTES,
            max: MAX_MINUTES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let s = Settings::default();
        assert_eq!(s.minutes(Mode::Focus), 25);
        assert_eq!(s.minutes(Mode::ShortBreak), 5);
        assert_eq!(s.minutes(Mode::LongBreak), 15);
        assert_eq!(s.seconds(Mode::Focus), 1500);
    }

    #[test]
    fn rejected_updates_keep_previous_value() {
        let mut s = Settings::default();
        for bad in [0, -5, 121] {
            assert!(s.update(Mode::Focus, bad).is_err());
            assert_eq!(s.minutes(Mode::Focus), 25);
        }
        assert!(matches!(
            s.update_from_str(Mode::Focus, "abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert_eq!(s.minutes(Mode::Focus), 25);
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut s = Settings::default();
        s.update(Mode::ShortBreak, 1).unwrap();
        s.update(Mode::LongBreak, 120).unwrap();
        assert_eq!(s.minutes(Mode::ShortBreak), 1);
        assert_eq!(s.minutes(Mode::LongBreak), 120);
        s.update_from_str(Mode::Focus, " 45 ").unwrap();
        assert_eq!(s.minutes(Mode::Focus), 45);
    }

    #[test]
    fn deserialize_validates_every_field() {
        let ok: Settings = serde_json::from_str(r#"{"work":50,"short":10,"long":30}"#).unwrap();
        assert_eq!(ok, Settings::new(50, 10, 30).unwrap());

        assert!(serde_json::from_str::<Settings>(r#"{"work":0,"short":10,"long":30}"#).is_err());
        assert!(serde_json::from_str::<Settings>(r#"{"work":25,"short":5}"#).is_err());
        assert!(serde_json::from_str::<Settings>(r#"{"work":"25","short":5,"long":15}"#).is_err());
    }

    #[test]
    fn serializes_with_short_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json, serde_json::json!({"work": 25, "short": 5, "long": 15}));
    }
}
