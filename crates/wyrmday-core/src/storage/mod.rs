mod config;
pub mod database;
mod memory;

pub use config::Config;
pub use database::Database;
pub use memory::MemoryStore;

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{ConfigError, Result};

/// String key-value persistence.
pub trait KvStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>>;
    fn kv_set(&self, key: &str, value: &str) -> Result<()>;
}

/// Append-only log of active calendar days.
pub trait ActivityLog {
    /// Mark `day` active. Recording the same day twice is a no-op.
    fn record_activity(&self, day: NaiveDate) -> Result<()>;
    /// Active days on or after `since`.
    fn activity_since(&self, since: NaiveDate) -> Result<BTreeSet<NaiveDate>>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        (**self).kv_get(key)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        (**self).kv_set(key, value)
    }
}

impl<T: ActivityLog + ?Sized> ActivityLog for &T {
    fn record_activity(&self, day: NaiveDate) -> Result<()> {
        (**self).record_activity(day)
    }

    fn activity_since(&self, since: NaiveDate) -> Result<BTreeSet<NaiveDate>> {
        (**self).activity_since(since)
    }
}

/// Read a JSON value, falling back to `T::default()` when missing or unreadable.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    match store.kv_get(key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "stored value unreadable, using defaults");
                Ok(T::default())
            }
        },
        None => Ok(T::default()),
    }
}

pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.kv_set(key, &raw)
}

/// Returns the data directory, creating it if needed.
///
/// `WYRMDAY_DATA_DIR` wins when set. Otherwise `~/.config/wyrmday/`, or
/// `~/.config/wyrmday-dev/` with `WYRMDAY_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("WYRMDAY_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("WYRMDAY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("wyrmday-dev")
            } else {
                base_dir.join("wyrmday")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
