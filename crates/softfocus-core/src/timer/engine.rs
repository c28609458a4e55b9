//! Timer engine implementation.
//!
//! A countdown state machine driven by discrete ticks. It does not spawn
//! anything: it owns a [`TickSource`] handle, arms it on start and cancels it
//! whenever the timer stops. The caller waits on the source and calls
//! `tick()` once per period.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle   (pause, reset, mode change, completion)
//! ```
//!
//! Mode is orthogonal to the Idle/Running axis.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings);
//! engine.start();
//! // once per period:
//! engine.tick(); // Returns Some(Event::TimerCompleted) at zero
//! ```

use chrono::Utc;

use super::clock::{ManualTicker, TickSource};
use super::mode::Mode;
use crate::events::Event;
use crate::settings::Settings;
use crate::view;

/// Core timer engine.
///
/// `is_active()` and `ticker().is_armed()` always agree.
#[derive(Debug)]
pub struct TimerEngine<T: TickSource = ManualTicker> {
    settings: Settings,
    mode: Mode,
    active: bool,
    remaining_secs: u64,
    ticker: T,
}

impl TimerEngine<ManualTicker> {
    /// Create an idle engine in focus mode, driven by hand.
    pub fn new(settings: Settings) -> Self {
        Self::with_ticker(settings, ManualTicker::new())
    }
}

impl<T: TickSource> TimerEngine<T> {
    /// Create an idle engine in focus mode with full time.
    pub fn with_ticker(settings: Settings, mut ticker: T) -> Self {
        ticker.cancel();
        Self {
            settings,
            mode: Mode::Focus,
            active: false,
            remaining_secs: settings.seconds(Mode::Focus),
            ticker,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Full length of the current mode in seconds.
    pub fn total_secs(&self) -> u64 {
        self.settings.seconds(self.mode)
    }

    /// remaining / total, 1.0 at full time and 0.0 when elapsed.
    pub fn progress(&self) -> f64 {
        view::progress_fraction(self.remaining_secs, self.total_secs())
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            is_active: self.active,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            formatted: view::format_time(self.remaining_secs),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.active || self.remaining_secs == 0 {
            return None;
        }
        self.active = true;
        self.ticker.arm();
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause_or_toggle(&mut self) -> Option<Event> {
        if !self.active {
            return self.start();
        }
        self.stop();
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Call once per tick period. Returns `Some(Event::TimerCompleted)` when
    /// the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.stop();
        Some(Event::TimerCompleted {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Event {
        let abandoned = self.active;
        self.stop();
        self.remaining_secs = self.total_secs();
        Event::TimerReset {
            mode: self.mode,
            abandoned,
            at: Utc::now(),
        }
    }

    pub fn change_mode(&mut self, mode: Mode) -> Event {
        let from = self.mode;
        self.mode = mode;
        self.stop();
        self.remaining_secs = self.total_secs();
        Event::ModeChanged {
            from,
            to: mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Replace the settings. An idle timer picks up the new duration for the
    /// current mode immediately; a running one keeps counting down.
    pub fn apply_settings(&mut self, settings: Settings) -> Event {
        self.settings = settings;
        if !self.active {
            self.remaining_secs = self.total_secs();
        }
        Event::SettingsApplied {
            settings,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn stop(&mut self) {
        self.active = false;
        self.ticker.cancel();
    }
}
