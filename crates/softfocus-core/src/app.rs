//! Application state container and command surface.
//!
//! [`AppState`] owns the timer engine, the task registry and the session
//! history, and applies the record policy:
//!
//! - a focus countdown that reaches zero appends a `Success`
//! - a focus countdown reset while running appends a `Failure`
//! - break completions and abandonments record nothing
//!
//! [`Controller`] wraps an `AppState` together with a
//! [`PersistenceGateway`] and writes the full snapshot after every command
//! that changed persisted data. Save failures are logged and swallowed; the
//! live session is the source of truth.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::events::Event;
use crate::history::{History, Outcome};
use crate::settings::Settings;
use crate::stats::{RewardJar, Stats};
use crate::storage::{PersistenceGateway, SlotStore, Snapshot};
use crate::task::{Task, TaskRegistry};
use crate::timer::{ManualTicker, Mode, TickSource, TimerEngine};
use crate::view;

#[derive(Debug)]
pub struct AppState<T: TickSource = ManualTicker> {
    engine: TimerEngine<T>,
    tasks: TaskRegistry,
    history: History,
}

impl AppState<ManualTicker> {
    /// Fresh state with default settings, driven by hand.
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default(), ManualTicker::new())
    }
}

impl Default for AppState<ManualTicker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TickSource> AppState<T> {
    /// Rehydrate from a snapshot. The timer starts idle in focus mode.
    pub fn from_snapshot(snapshot: Snapshot, ticker: T) -> Self {
        Self {
            engine: TimerEngine::with_ticker(snapshot.settings, ticker),
            tasks: TaskRegistry::from_tasks(snapshot.tasks),
            history: History::from_records(snapshot.history),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            settings: *self.engine.settings(),
            tasks: self.tasks.tasks().to_vec(),
            history: self.history.records().to_vec(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine<T> {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut TimerEngine<T> {
        &mut self.engine
    }

    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn task_registry(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn stats(&self) -> Stats {
        Stats::from_history(&self.history)
    }

    pub fn reward_jar(&self) -> RewardJar {
        RewardJar::from_history(&self.history)
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_time(&self) -> String {
        view::format_time(self.engine.remaining_secs())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_or_pause(&mut self) -> Vec<Event> {
        self.engine.pause_or_toggle().into_iter().collect()
    }

    /// Deliver one clock tick.
    pub fn tick(&mut self) -> Vec<Event> {
        let Some(event) = self.engine.tick() else {
            return Vec::new();
        };
        let recorded = match event {
            Event::TimerCompleted { mode, at } if mode.is_focus() => {
                Some(self.record(Outcome::Success, at))
            }
            Event::TimerCompleted { mode, .. } => {
                debug!(%mode, "break finished, nothing recorded");
                None
            }
            _ => None,
        };
        std::iter::once(event).chain(recorded).collect()
    }

    pub fn reset(&mut self) -> Vec<Event> {
        let event = self.engine.reset();
        let recorded = match event {
            Event::TimerReset {
                mode,
                abandoned: true,
                at,
            } if mode.is_focus() => Some(self.record(Outcome::Failure, at)),
            _ => None,
        };
        std::iter::once(event).chain(recorded).collect()
    }

    pub fn change_mode(&mut self, mode: Mode) -> Vec<Event> {
        vec![self.engine.change_mode(mode)]
    }

    pub fn save_settings(&mut self, settings: Settings) -> Vec<Event> {
        vec![self.engine.apply_settings(settings)]
    }

    /// Edit one duration from user text and apply the result.
    ///
    /// # Errors
    /// Returns the validation failure; settings are unchanged.
    pub fn update_setting(&mut self, mode: Mode, input: &str) -> Result<Vec<Event>, ValidationError> {
        let mut settings = *self.engine.settings();
        settings.update_from_str(mode, input)?;
        Ok(self.save_settings(settings))
    }

    /// # Errors
    /// Returns [`ValidationError::EmptyText`] for blank text.
    pub fn add_task(&mut self, text: &str) -> Result<Vec<Event>, ValidationError> {
        let task = self.tasks.add(text)?.clone();
        Ok(vec![Event::TaskAdded { task }])
    }

    pub fn toggle_task(&mut self, id: &str) -> Vec<Event> {
        self.tasks
            .toggle_completion(id)
            .map(|is_completed| Event::TaskToggled {
                id: id.to_string(),
                is_completed,
            })
            .into_iter()
            .collect()
    }

    pub fn delete_task(&mut self, id: &str) -> Vec<Event> {
        self.tasks
            .remove(id)
            .map(|task| Event::TaskDeleted { id: task.id })
            .into_iter()
            .collect()
    }

    pub fn select_task(&mut self, id: &str) -> Vec<Event> {
        let selected = self.tasks.select(id).then(|| id.to_string());
        vec![Event::TaskSelected { id: selected }]
    }

    fn record(&mut self, outcome: Outcome, at: chrono::DateTime<Utc>) -> Event {
        let record = self.history.record(outcome, at).clone();
        info!(id = %record.id, outcome = ?record.outcome, "session recorded");
        Event::SessionRecorded { record }
    }
}

/// Runs commands against an [`AppState`] and mirrors it to storage.
pub struct Controller<S: SlotStore, T: TickSource = ManualTicker> {
    state: AppState<T>,
    gateway: PersistenceGateway<S>,
}

impl<S: SlotStore, T: TickSource> Controller<S, T> {
    /// Load the stored snapshot and build the live state from it.
    pub fn open(gateway: PersistenceGateway<S>, ticker: T) -> Self {
        let snapshot = gateway.load();
        info!(
            key = gateway.key(),
            tasks = snapshot.tasks.len(),
            sessions = snapshot.history.len(),
            "snapshot loaded"
        );
        Self {
            state: AppState::from_snapshot(snapshot, ticker),
            gateway,
        }
    }

    pub fn state(&self) -> &AppState<T> {
        &self.state
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        self.state.engine_mut().ticker_mut()
    }

    pub fn start_or_pause(&mut self) -> Vec<Event> {
        let events = self.state.start_or_pause();
        self.commit(events)
    }

    pub fn tick(&mut self) -> Vec<Event> {
        let events = self.state.tick();
        self.commit(events)
    }

    pub fn reset(&mut self) -> Vec<Event> {
        let events = self.state.reset();
        self.commit(events)
    }

    pub fn change_mode(&mut self, mode: Mode) -> Vec<Event> {
        let events = self.state.change_mode(mode);
        self.commit(events)
    }

    pub fn save_settings(&mut self, settings: Settings) -> Vec<Event> {
        let events = self.state.save_settings(settings);
        self.commit(events)
    }

    /// Invalid input is ignored: no events, nothing saved.
    pub fn update_setting(&mut self, mode: Mode, input: &str) -> Vec<Event> {
        let events = self.state.update_setting(mode, input).unwrap_or_else(|e| {
            debug!(error = %e, "settings edit rejected");
            Vec::new()
        });
        self.commit(events)
    }

    /// Blank text is ignored: no events, nothing saved.
    pub fn add_task(&mut self, text: &str) -> Vec<Event> {
        let events = self.state.add_task(text).unwrap_or_else(|e| {
            debug!(error = %e, "task rejected");
            Vec::new()
        });
        self.commit(events)
    }

    pub fn toggle_task(&mut self, id: &str) -> Vec<Event> {
        let events = self.state.toggle_task(id);
        self.commit(events)
    }

    pub fn delete_task(&mut self, id: &str) -> Vec<Event> {
        let events = self.state.delete_task(id);
        self.commit(events)
    }

    pub fn select_task(&mut self, id: &str) -> Vec<Event> {
        let events = self.state.select_task(id);
        self.commit(events)
    }

    fn commit(&mut self, events: Vec<Event>) -> Vec<Event> {
        if events.iter().any(Event::is_persistent) {
            if let Err(e) = self.gateway.save(&self.state.snapshot()) {
                warn!(error = %e, "failed to save snapshot, continuing");
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::{MemoryStore, DEFAULT_SLOT_KEY};

    fn run_ticks<T: TickSource>(state: &mut AppState<T>, n: usize) -> Vec<Event> {
        (0..n).flat_map(|_| state.tick()).collect()
    }

    #[test]
    fn focus_completion_records_success() {
        let mut state = AppState::new();
        state.start_or_pause();
        let events = run_ticks(&mut state, 1500);
        assert_eq!(state.engine().remaining_secs(), 0);
        assert!(!state.engine().is_active());
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history().records()[0].outcome, Outcome::Success);
        assert!(matches!(events[0], Event::TimerCompleted { mode: Mode::Focus, .. }));
        assert!(matches!(events[1], Event::SessionRecorded { .. }));
    }

    #[test]
    fn break_completion_records_nothing() {
        let mut state = AppState::new();
        state.change_mode(Mode::ShortBreak);
        state.start_or_pause();
        let events = run_ticks(&mut state, 300);
        assert_eq!(events.len(), 1);
        assert!(state.history().is_empty());
    }

    #[test]
    fn focus_abandonment_records_failure() {
        let mut state = AppState::new();
        state.start_or_pause();
        run_ticks(&mut state, 42);
        let events = state.reset();
        assert!(matches!(events[0], Event::TimerReset { abandoned: true, .. }));
        assert!(matches!(events[1], Event::SessionRecorded { .. }));
        assert_eq!(state.history().count(Outcome::Failure), 1);
        assert_eq!(state.engine().remaining_secs(), 1500);
        assert!(!state.engine().is_active());
    }

    #[test]
    fn reset_while_paused_is_not_abandonment() {
        let mut state = AppState::new();
        state.start_or_pause();
        run_ticks(&mut state, 5);
        state.start_or_pause();
        assert_eq!(state.reset().len(), 1);
        assert!(state.history().is_empty());
    }

    #[test]
    fn change_mode_never_records() {
        let mut state = AppState::new();
        state.start_or_pause();
        run_ticks(&mut state, 10);
        state.change_mode(Mode::LongBreak);
        state.change_mode(Mode::Focus);
        assert!(state.history().is_empty());
    }

    #[test]
    fn update_setting_rejects_bad_input() {
        let mut state = AppState::new();
        assert!(state.update_setting(Mode::Focus, "abc").is_err());
        assert!(state.update_setting(Mode::Focus, "0").is_err());
        assert_eq!(state.settings().minutes(Mode::Focus), 25);
        state.update_setting(Mode::Focus, "30").unwrap();
        assert_eq!(state.engine().remaining_secs(), 1800);
    }

    #[test]
    fn snapshot_reflects_all_owned_data() {
        let mut state = AppState::new();
        state.add_task("A").unwrap();
        state.start_or_pause();
        state.reset();
        let snap = state.snapshot();
        assert_eq!(snap.tasks.len(), 1);
        assert_eq!(snap.history.len(), 1);
        assert_eq!(snap.settings, Settings::default());
    }

    #[test]
    fn controller_saves_after_persistent_commands_only() {
        let mut ctl = Controller::open(PersistenceGateway::new(MemoryStore::new()), ManualTicker::new());
        ctl.start_or_pause();
        assert!(ctl.gateway().store().get(DEFAULT_SLOT_KEY).is_none());

        ctl.add_task("Plan");
        let saved = ctl.gateway().load();
        assert_eq!(saved.tasks.len(), 1);
        assert_eq!(saved.tasks[0].text, "Plan");
    }

    #[test]
    fn controller_ignores_blank_task() {
        let mut ctl = Controller::open(PersistenceGateway::new(MemoryStore::new()), ManualTicker::new());
        assert!(ctl.add_task("  ").is_empty());
        assert!(ctl.state().tasks().is_empty());
        assert!(ctl.gateway().store().get(DEFAULT_SLOT_KEY).is_none());
    }

    struct BrokenStore;

    impl SlotStore for BrokenStore {
        fn read_slot(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Locked)
        }

        fn write_slot(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Locked)
        }
    }

    #[test]
    fn storage_failures_do_not_interrupt_the_session() {
        let mut ctl = Controller::open(PersistenceGateway::new(BrokenStore), ManualTicker::new());
        assert_eq!(ctl.state().settings(), &Settings::default());
        ctl.add_task("Still works");
        ctl.start_or_pause();
        for _ in 0..1500 {
            ctl.tick();
        }
        assert_eq!(ctl.state().tasks().len(), 1);
        assert_eq!(ctl.state().history().len(), 1);
    }
}
