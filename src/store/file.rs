//! JSON file store

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use anyhow::Context;
use tracing::{debug, warn};

use super::{Entries, KeyValueStore};

/// Store persisting entries as a single JSON object of string pairs
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn load(&self) -> anyhow::Result<Entries> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store at {}, starting fresh", self.path.display());
                return Ok(Entries::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Ignoring malformed store {}: {}", self.path.display(), e);
                Ok(Entries::new())
            }
        }
    }

    fn save(&mut self, entries: &Entries) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}
