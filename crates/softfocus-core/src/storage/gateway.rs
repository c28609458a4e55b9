//! Snapshot serialization boundary.
//!
//! The gateway owns no application data. It turns a [`Snapshot`] into JSON
//! for a single key-value slot and back. Loading never fails: a missing
//! slot, unreadable JSON, or any top-level field that is absent or invalid
//! falls back to that field's default. List fields are read element by
//! element, so one malformed task or record drops only itself.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::SlotStore;
use crate::error::Result;
use crate::history::SessionRecord;
use crate::settings::Settings;
use crate::task::Task;

/// Key of the slot holding the snapshot.
pub const DEFAULT_SLOT_KEY: &str = "pomodoro-settings-v1";

/// Everything that outlives a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub settings: Settings,
    pub tasks: Vec<Task>,
    pub history: Vec<SessionRecord>,
}

impl Snapshot {
    /// Parse slot content, substituting defaults for whatever is unreadable.
    pub fn from_json_lenient(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stored snapshot is not valid JSON, using defaults");
                return Self::default();
            }
        };
        let Some(obj) = value.as_object() else {
            warn!("stored snapshot is not a JSON object, using defaults");
            return Self::default();
        };
        Self {
            settings: field_or_default(obj, "settings"),
            tasks: list_or_default(obj, "tasks"),
            history: list_or_default(obj, "history"),
        }
    }
}

fn field_or_default<T: DeserializeOwned + Default>(obj: &Map<String, Value>, name: &str) -> T {
    match obj.get(name) {
        None => {
            debug!(field = name, "snapshot field absent, using default");
            T::default()
        }
        Some(v) => T::deserialize(v).unwrap_or_else(|e| {
            warn!(field = name, error = %e, "snapshot field invalid, using default");
            T::default()
        }),
    }
}

fn list_or_default<T: DeserializeOwned>(obj: &Map<String, Value>, name: &str) -> Vec<T> {
    let items: Vec<Value> = field_or_default(obj, name);
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            T::deserialize(item)
                .map_err(|e| warn!(field = name, index, error = %e, "skipping invalid entry"))
                .ok()
        })
        .collect()
}

/// Reads and writes the snapshot slot of a [`SlotStore`].
pub struct PersistenceGateway<S: SlotStore> {
    store: S,
    key: String,
}

impl<S: SlotStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the snapshot. Never fails; see the module docs.
    pub fn load(&self) -> Snapshot {
        match self.store.read_slot(&self.key) {
            Ok(Some(raw)) => Snapshot::from_json_lenient(&raw),
            Ok(None) => {
                debug!(key = %self.key, "no stored snapshot, starting fresh");
                Snapshot::default()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read stored snapshot, using defaults");
                Snapshot::default()
            }
        }
    }

    /// Serialize the full snapshot and overwrite the slot.
    ///
    /// # Errors
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.store.write_slot(&self.key, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Outcome;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn sample() -> Snapshot {
        Snapshot {
            settings: Settings::new(50, 10, 20).unwrap(),
            tasks: vec![Task {
                id: "t1".into(),
                text: "Write".into(),
                is_completed: false,
                is_active: true,
            }],
            history: vec![SessionRecord {
                id: "s1".into(),
                outcome: Outcome::Success,
                timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            }],
        }
    }

    #[test]
    fn missing_slot_loads_defaults() {
        let gw = PersistenceGateway::new(MemoryStore::new());
        assert_eq!(gw.load(), Snapshot::default());
    }

    #[test]
    fn save_then_load_is_identity() {
        let mut gw = PersistenceGateway::new(MemoryStore::new());
        gw.save(&sample()).unwrap();
        let loaded = gw.load();
        assert_eq!(loaded, sample());

        let before = gw.store().get(DEFAULT_SLOT_KEY).unwrap().to_string();
        gw.save(&loaded).unwrap();
        assert_eq!(gw.store().get(DEFAULT_SLOT_KEY).unwrap(), before);
    }

    #[test]
    fn garbage_loads_defaults() {
        for raw in ["not json", "[1,2,3]", "null", "{"] {
            let gw = PersistenceGateway::new(MemoryStore::new().with_slot(DEFAULT_SLOT_KEY, raw));
            assert_eq!(gw.load(), Snapshot::default(), "input: {raw}");
        }
    }

    #[test]
    fn each_field_falls_back_independently() {
        let raw = r#"{
            "settings": {"work": 0, "short": 5, "long": 15},
            "tasks": [{"id": "a", "text": "A", "isCompleted": false, "isActive": true}],
            "history": "oops"
        }"#;
        let gw = PersistenceGateway::new(MemoryStore::new().with_slot(DEFAULT_SLOT_KEY, raw));
        let snap = gw.load();
        assert_eq!(snap.settings, Settings::default());
        assert_eq!(snap.tasks.len(), 1);
        assert!(snap.history.is_empty());
    }

    #[test]
    fn invalid_list_entries_are_dropped_individually() {
        let raw = r#"{
            "tasks": [
                {"id": "a", "text": "A", "isCompleted": false, "isActive": true},
                {"id": "b", "text": 7},
                {"id": "c", "text": "C", "isCompleted": true, "isActive": false}
            ],
            "history": [
                {"id": "h1", "type": "success", "timestamp": 1700000000000},
                {"id": "h2", "type": "success"},
                {"id": "h3", "type": "failure", "timestamp": 1700000060000}
            ]
        }"#;
        let gw = PersistenceGateway::new(MemoryStore::new().with_slot(DEFAULT_SLOT_KEY, raw));
        let snap = gw.load();

        let task_ids: Vec<_> = snap.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(task_ids, ["a", "c"]);
        let record_ids: Vec<_> = snap.history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(record_ids, ["h1", "h3"]);
    }

    #[test]
    fn absent_fields_use_defaults() {
        let raw = r#"{"history": [{"id": "h", "type": "failure", "timestamp": 1700000000000}]}"#;
        let gw = PersistenceGateway::new(MemoryStore::new().with_slot(DEFAULT_SLOT_KEY, raw));
        let snap = gw.load();
        assert_eq!(snap.settings, Settings::default());
        assert!(snap.tasks.is_empty());
        assert_eq!(snap.history[0].outcome, Outcome::Failure);
    }

    #[test]
    fn custom_key_is_respected() {
        let mut gw = PersistenceGateway::with_key(MemoryStore::new(), "other");
        gw.save(&sample()).unwrap();
        assert!(gw.store().get(DEFAULT_SLOT_KEY).is_none());
        assert!(gw.store().get("other").is_some());
        assert_eq!(gw.key(), "other");
    }
}
