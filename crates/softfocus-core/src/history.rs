//! Append-only log of focus sessions.
//!
//! Records are created by [`History::record`] and never updated or removed.
//! Insertion order is chronological order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// One completed or abandoned focus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub outcome: Outcome,
    /// Creation instant, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<SessionRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from persisted records, keeping their order.
    pub fn from_records(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    /// Append a record with a fresh id.
    ///
    /// The timestamp is truncated to millisecond precision so the in-memory
    /// record is identical to its persisted form.
    pub fn record(&mut self, outcome: Outcome, at: DateTime<Utc>) -> &SessionRecord {
        let timestamp = DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at);
        self.records.push(SessionRecord {
            id: Uuid::new_v4().to_string(),
            outcome,
            timestamp,
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_appends_in_order_with_unique_ids() {
        let mut h = History::new();
        let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let a = h.record(Outcome::Success, t0).id.clone();
        let b = h.record(Outcome::Failure, t0 + chrono::Duration::minutes(1)).id.clone();
        assert_ne!(a, b);
        assert_eq!(h.len(), 2);
        assert_eq!(h.records()[0].outcome, Outcome::Success);
        assert_eq!(h.records()[1].outcome, Outcome::Failure);
        assert_eq!(h.count(Outcome::Success), 1);
    }

    #[test]
    fn timestamps_are_millisecond_precision() {
        let mut h = History::new();
        let at = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let rec = h.record(Outcome::Success, at);
        assert_eq!(rec.timestamp.timestamp_millis(), 1_700_000_000_123);
        assert_eq!(rec.timestamp.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn wire_format_uses_type_and_epoch_millis() {
        let rec = SessionRecord {
            id: "abc".into(),
            outcome: Outcome::Failure,
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_500).unwrap(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "type": "failure", "timestamp": 1_700_000_000_500_i64})
        );
        let back: SessionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, rec);
    }
}
