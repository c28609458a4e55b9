mod config;
pub mod database;
pub mod gateway;
mod memory;

pub use config::{ClockConfig, Config, LogConfig, StorageConfig};
pub use database::Database;
pub use gateway::{PersistenceGateway, Snapshot, DEFAULT_SLOT_KEY};
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// A durable string slot addressed by key.
///
/// The whole application state lives in one slot; backends only need to
/// read and overwrite it.
pub trait SlotStore {
    /// Read the slot. `Ok(None)` when nothing has been written yet.
    fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot.
    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Returns the data directory, creating it if needed.
///
/// `SOFTFOCUS_HOME` overrides the location outright. Otherwise this is
/// `~/.config/softfocus[-dev]/`, with the `-dev` suffix when
/// `SOFTFOCUS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("SOFTFOCUS_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SOFTFOCUS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("softfocus-dev")
            } else {
                base_dir.join("softfocus")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
