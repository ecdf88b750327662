//! Key-value persistence module
//!
//! Everything the timer remembers between runs is a flat map of string keys
//! to string values. This module defines the storage seam and its backends.

pub mod file;
pub mod memory;

use std::collections::BTreeMap;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Flat string key-value entries as persisted
pub type Entries = BTreeMap<String, String>;

/// Backend able to load and save the persisted entries
pub trait KeyValueStore: Send {
    /// Load every persisted entry. A store with nothing saved yet is empty.
    fn load(&self) -> anyhow::Result<Entries>;

    /// Replace the persisted entries
    fn save(&mut self, entries: &Entries) -> anyhow::Result<()>;
}
