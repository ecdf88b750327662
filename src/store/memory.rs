//! In-process store, shared between clones

use std::sync::{Arc, Mutex};

use super::{Entries, KeyValueStore};

/// Store keeping entries in memory. Clones share the same entries, so a
/// test can hand one clone to the controller and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Read a single persisted value
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Entries> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|e| anyhow::anyhow!("Failed to lock memory store: {}", e))
    }

    fn save(&mut self, entries: &Entries) -> anyhow::Result<()> {
        let mut stored = self.entries
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock memory store: {}", e))?;
        *stored = entries.clone();
        Ok(())
    }
}
