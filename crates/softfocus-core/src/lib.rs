//! # SoftFocus Core Library
//!
//! Core logic for the SoftFocus Pomodoro timer: everything except rendering.
//! The CLI binary is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven countdown state machine that owns its
//!   tick source; the caller waits on the source and calls `tick()`
//! - **Tasks / History / Settings**: the user's data, each owned by one type
//! - **Storage**: the whole snapshot mirrored as JSON into one key-value slot
//!   (SQLite), plus TOML process configuration
//! - **App**: the state container and the command surface the presentation
//!   layer calls
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`AppState`] / [`Controller`]: State container and persisting command surface
//! - [`PersistenceGateway`]: Snapshot load/save boundary
//! - [`Config`]: Application configuration management

pub mod app;
pub mod error;
pub mod events;
pub mod history;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;
pub mod view;

pub use app::{AppState, Controller};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use history::{History, Outcome, SessionRecord};
pub use settings::Settings;
pub use stats::{JarToken, RewardJar, Stats};
pub use storage::{Config, Database, MemoryStore, PersistenceGateway, SlotStore, Snapshot};
pub use task::{Task, TaskRegistry};
pub use timer::{IntervalTicker, ManualTicker, Mode, TickSource, TimerEngine};
