mod clock;
mod engine;
mod mode;

pub use clock::{tick_duration, IntervalTicker, ManualTicker, TickSource, DEFAULT_TICK_MS};
pub use engine::TimerEngine;
pub use mode::Mode;
