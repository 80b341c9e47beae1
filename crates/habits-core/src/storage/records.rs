//! Typed records on top of a [`KeyValueStore`]
//!
//! Each piece of ledger state lives under its own key as a JSON document.
//! Reads fail soft: a missing, unreadable or malformed value is reported
//! as absent and logged, never surfaced as an error.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::error::{StorageError, StorageResult};
use super::kv::KeyValueStore;
use crate::clock::parse_date;

/// JSON array of habits
pub const HABITS_KEY: &str = "habits";
/// JSON array of progress days
pub const PROGRESS_KEY: &str = "progress";
/// The date the ledger last considered today
pub const LAST_DATE_KEY: &str = "lastDate";
/// Reminder preference object
pub const REMINDER_KEY: &str = "intervalReminder";

/// Read and decode the value at `key`
///
/// Returns `None` when the key is absent or cannot be read or decoded.
pub fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value, treating as empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "stored value is corrupt, treating as empty");
            None
        }
    }
}

/// Encode `value` as JSON and write it to `key`
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::InvalidValue {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Read a stored date
///
/// Accepts both a JSON string (`"2024-01-01"`) and the bare unquoted
/// form (`2024-01-01`) older stores wrote.
pub fn read_date<S>(store: &S, key: &str) -> Option<NaiveDate>
where
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored date");
            return None;
        }
    };

    let parsed = serde_json::from_str::<String>(&raw)
        .ok()
        .and_then(|s| parse_date(&s))
        .or_else(|| parse_date(&raw));
    if parsed.is_none() {
        warn!(key, value = %raw, "stored date is not YYYY-MM-DD, ignoring");
    }
    parsed
}
