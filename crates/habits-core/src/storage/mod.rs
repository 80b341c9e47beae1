//! Storage layer
//!
//! Ledger state is persisted through a string key-value interface.
//!
//! ## Architecture
//!
//! - **KeyValueStore**: `get` / `set` of raw strings per key
//! - **SqliteStore**: on-disk implementation (one `kv` table)
//! - **records**: JSON encoding of habits, progress and dates per key
//!
//! Reads never fail: anything unreadable is logged and treated as empty.

pub mod error;
pub mod kv;
pub mod records;
pub mod schema;

pub use error::{StorageError, StorageResult};
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use records::{HABITS_KEY, LAST_DATE_KEY, PROGRESS_KEY, REMINDER_KEY};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
