use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::warn;

use crate::backend::interface::{KeyValueStore, Result, StorageError};

type Entries = BTreeMap<String, String>;

/// Key-value store kept as a single JSON object in a file.
///
/// A missing file is an empty store. Writes go to a sibling temporary
/// file which is then renamed over the original.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl AsRef<Path>) -> JsonStore {
        JsonStore { path: path.as_ref().to_path_buf(), write_guard: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable(&self.path, err)),
        }
    }

    fn read_entries(&self) -> Result<Entries> {
        let content = match self.read_content()? {
            Some(content) => content,
            None => return Ok(Entries::new()),
        };
        return serde_json::from_str(&content)
            .map_err(|err| unavailable(&self.path, format!("malformed store file: {}", err)));
    }

    /// Entries to start a write from. A malformed file would otherwise
    /// block every write, so it is replaced instead.
    fn entries_for_write(&self) -> Result<Entries> {
        let content = match self.read_content()? {
            Some(content) => content,
            None => return Ok(Entries::new()),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!("discarding malformed store {}: {}", self.path.display(), err);
                Ok(Entries::new())
            }
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| unavailable(parent, err))?;
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content).map_err(|err| unavailable(&tmp_path, err))?;
        fs::rename(&tmp_path, &self.path).map_err(|err| unavailable(&self.path, err))?;
        return Ok(());
    }

    fn modify(&self, change: impl FnOnce(&mut Entries)) -> Result<()> {
        let _guard = self.write_guard.lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".to_string()))?;
        let mut entries = self.entries_for_write()?;
        change(&mut entries);
        return self.write_entries(&entries);
    }
}

fn unavailable(path: &Path, reason: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable(format!("{}: {}", path.display(), reason))
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_entries()?;
        return Ok(entries.remove(key));
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
