use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::SessionRecord;
use crate::settings::Settings;
use crate::task::Task;
use crate::timer::Mode;

/// Every state change in the system produces an Event.
/// The presentation layer polls state; events describe what just happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero and the timer went idle.
    TimerCompleted {
        mode: Mode,
        at: DateTime<Utc>,
    },
    /// Timer returned to full time. `abandoned` is set when it was running.
    TimerReset {
        mode: Mode,
        abandoned: bool,
        at: DateTime<Utc>,
    },
    ModeChanged {
        from: Mode,
        to: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SettingsApplied {
        settings: Settings,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        record: SessionRecord,
    },
    TaskAdded {
        task: Task,
    },
    TaskToggled {
        id: String,
        is_completed: bool,
    },
    TaskDeleted {
        id: String,
    },
    /// Selection moved. `id` is `None` when no task matched.
    TaskSelected {
        id: Option<String>,
    },
    StateSnapshot {
        mode: Mode,
        is_active: bool,
        remaining_secs: u64,
        total_secs: u64,
        formatted: String,
        progress: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether this event changed data that belongs in the persisted snapshot.
    ///
    /// Mode changes count even though the mode itself is not stored.
    pub fn is_persistent(&self) -> bool {
        matches!(
            self,
            Event::ModeChanged { .. }
                | Event::SettingsApplied { .. }
                | Event::SessionRecorded { .. }
                | Event::TaskAdded { .. }
                | Event::TaskToggled { .. }
                | Event::TaskDeleted { .. }
                | Event::TaskSelected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::TaskDeleted { id: "abc".into() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({"type": "TaskDeleted", "id": "abc"}));
    }

    #[test]
    fn timer_motion_is_not_persistent() {
        let at = Utc::now();
        assert!(!Event::TimerStarted { mode: Mode::Focus, remaining_secs: 1, at }.is_persistent());
        assert!(!Event::TimerCompleted { mode: Mode::Focus, at }.is_persistent());
        assert!(Event::ModeChanged {
            from: Mode::Focus,
            to: Mode::ShortBreak,
            remaining_secs: 300,
            at,
        }
        .is_persistent());
    }
}
