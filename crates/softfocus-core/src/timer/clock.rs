//! Periodic tick sources.
//!
//! The engine owns exactly one [`TickSource`]. Starting the timer arms it;
//! pausing, resetting, switching mode and completing all cancel it. The
//! source itself never touches timer state; whoever drives the loop waits on
//! it and then calls [`TimerEngine::tick`](super::TimerEngine::tick).

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Default tick period.
pub const DEFAULT_TICK_MS: u64 = 1000;

pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// A cancellable periodic signal.
pub trait TickSource {
    /// Begin delivering ticks. Arming an armed source does nothing.
    fn arm(&mut self);
    /// Stop delivering ticks.
    fn cancel(&mut self);
    fn is_armed(&self) -> bool;
}

/// Tick source for tests and headless use: ticks are delivered by hand.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    armed: bool,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for ManualTicker {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Wall-clock tick source backed by a tokio interval.
///
/// Must be armed from inside a tokio runtime. The first tick fires one full
/// period after arming; late ticks are delayed, never bunched.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick.
    ///
    /// Never resolves while the source is cancelled, so it can sit in a
    /// `select!` next to other inputs.
    pub async fn wait(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(tick_duration())
    }
}

impl TickSource for IntervalTicker {
    fn arm(&mut self) {
        if self.interval.is_none() {
            let mut interval = time::interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.interval = Some(interval);
        }
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_ticker_arm_and_cancel_are_idempotent() {
        let mut t = ManualTicker::new();
        assert!(!t.is_armed());
        t.arm();
        t.arm();
        assert!(t.is_armed());
        t.cancel();
        t.cancel();
        assert!(!t.is_armed());
    }

    #[test]
    fn default_period_is_one_second() {
        assert_eq!(tick_duration(), Duration::from_millis(1000));
        assert_eq!(IntervalTicker::default().period(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticker_fires_one_period_after_arming() {
        let mut t = IntervalTicker::new(Duration::from_millis(1000));
        t.arm();
        let started = Instant::now();
        t.wait().await;
        assert_eq!(started.elapsed(), Duration::from_millis(1000));
        t.wait().await;
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_interval_ticker_never_fires() {
        let mut t = IntervalTicker::new(Duration::from_millis(10));
        t.arm();
        t.cancel();
        assert!(!t.is_armed());
        let waited = time::timeout(Duration::from_secs(5), t.wait()).await;
        assert!(waited.is_err());
    }
}
