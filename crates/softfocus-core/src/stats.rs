//! Aggregate statistics and the reward jar.

use serde::{Deserialize, Serialize};

use crate::history::{History, Outcome, SessionRecord};

/// Minutes credited per successful session when computing focus hours.
///
/// Fixed, independent of the configured focus duration.
pub const FOCUS_MINUTES_PER_SESSION: u64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub successful: u64,
    pub failed: u64,
    pub total_focus_hours: f64,
}

impl Stats {
    pub fn from_history(history: &History) -> Self {
        Self::from_records(history.records())
    }

    pub fn from_records(records: &[SessionRecord]) -> Self {
        let successful = records
            .iter()
            .filter(|r| r.outcome == Outcome::Success)
            .count() as u64;
        let failed = records.len() as u64 - successful;
        Self {
            successful,
            failed,
            total_focus_hours: (successful * FOCUS_MINUTES_PER_SESSION) as f64 / 60.0,
        }
    }

    /// Focus hours rounded to one decimal place, e.g. `"1.7"`.
    pub fn total_focus_hours_display(&self) -> String {
        format!("{:.1}", self.total_focus_hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JarToken {
    /// A completed session.
    Ripe,
    /// An abandoned session.
    Unripe,
}

impl JarToken {
    pub fn glyph(self) -> &'static str {
        match self {
            JarToken::Ripe => "🍅",
            JarToken::Unripe => "🟡",
        }
    }
}

/// One token per session, in the order the sessions happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardJar {
    pub tokens: Vec<JarToken>,
}

impl RewardJar {
    pub const EMPTY_PLACEHOLDER: &'static str = "Start Focusing";

    pub fn from_history(history: &History) -> Self {
        let tokens = history
            .records()
            .iter()
            .map(|r| match r.outcome {
                Outcome::Success => JarToken::Ripe,
                Outcome::Failure => JarToken::Unripe,
            })
            .collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lay the tokens out in rows of `per_row`, or the placeholder when empty.
    pub fn render(&self, per_row: usize) -> String {
        if self.tokens.is_empty() {
            return Self::EMPTY_PLACEHOLDER.to_string();
        }
        self.tokens
            .chunks(per_row.max(1))
            .map(|row| row.iter().map(|t| t.glyph()).collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn history(outcomes: &[Outcome]) -> History {
        let mut h = History::new();
        for &o in outcomes {
            h.record(o, Utc::now());
        }
        h
    }

    #[test]
    fn empty_history_has_zero_stats() {
        let stats = Stats::from_history(&History::new());
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.total_focus_hours_display(), "0.0");
    }

    #[test]
    fn focus_hours_use_fixed_session_length() {
        let h = history(&[
            Outcome::Success,
            Outcome::Success,
            Outcome::Failure,
            Outcome::Success,
            Outcome::Success,
        ]);
        let stats = Stats::from_history(&h);
        assert_eq!(stats.successful, 4);
        assert_eq!(stats.failed, 1);
        assert!((stats.total_focus_hours - 100.0 / 60.0).abs() < 1e-9);
        assert_eq!(stats.total_focus_hours_display(), "1.7");
    }

    #[test]
    fn jar_follows_history_order() {
        let h = history(&[Outcome::Failure, Outcome::Success, Outcome::Success]);
        let jar = RewardJar::from_history(&h);
        assert_eq!(jar.tokens, vec![JarToken::Unripe, JarToken::Ripe, JarToken::Ripe]);
        assert_eq!(jar.render(2), "🟡 🍅\n🍅");
    }

    #[test]
    fn empty_jar_renders_placeholder() {
        let jar = RewardJar::from_history(&History::new());
        assert!(jar.is_empty());
        assert_eq!(jar.render(5), "Start Focusing");
    }
}
