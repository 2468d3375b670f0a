//! Persistence of the [`AppState`] document in a key-value blob store.
//!
//! The whole state lives under a single key as one JSON document. Loading is
//! forgiving: a missing or malformed document yields a fresh default state.
//! Importing a user-supplied file is strict and reports why it was refused.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Result, TimetableError};
use crate::state::{AppState, STATE_VERSION};

/// Key the state document is stored under.
pub const STORAGE_KEY: &str = "local-storage-scheduler-data";

/// Minimal blob store the state is persisted into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, useful for tests and hosts without a filesystem.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| storage_error("create", &self.dir, e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| storage_error("write", &path, e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &path, e)),
        }
    }
}

fn storage_error(action: &str, path: &Path, e: std::io::Error) -> TimetableError {
    TimetableError::Storage(format!("failed to {} {}: {}", action, path.display(), e))
}

/// Load the persisted state, falling back to a fresh state when nothing is
/// stored or the stored document is unusable. Only store failures are errors.
pub fn load_state(store: &dyn KeyValueStore) -> Result<AppState> {
    let Some(raw) = store.get(STORAGE_KEY)? else {
        tracing::debug!("no stored state, starting fresh");
        return Ok(AppState::new());
    };

    match parse_document(&raw) {
        Ok(state) => Ok(state),
        Err(e) => {
            tracing::warn!(error = %e, "invalid stored state, using defaults");
            Ok(AppState::new())
        }
    }
}

/// Persist the state, stamping the current document version.
pub fn save_state(store: &mut dyn KeyValueStore, state: &AppState) -> Result<()> {
    let mut stamped = state.clone();
    stamped.version = STATE_VERSION.to_string();
    let json = serde_json::to_string(&stamped)?;
    store.set(STORAGE_KEY, &json)?;
    tracing::debug!(bytes = json.len(), "state saved");
    Ok(())
}

pub fn clear_state(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove(STORAGE_KEY)
}

/// Parse and validate an imported state document.
///
/// Returns [`TimetableError::Json`] when the text is not JSON, and
/// [`TimetableError::InvalidDocument`] when it is JSON of the wrong shape.
pub fn parse_document(json: &str) -> Result<AppState> {
    let value: Value = serde_json::from_str(json)?;
    if !has_valid_shape(&value) {
        return Err(TimetableError::InvalidDocument);
    }
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "document failed typed decoding");
        TimetableError::InvalidDocument
    })
}

/// Pretty-printed JSON backup of the whole state.
pub fn export_document(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Default backup file name, e.g. `schedule-backup-2026-03-14.json`.
pub fn backup_filename(date: NaiveDate) -> String {
    format!("schedule-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Structural check applied before typed decoding: the top-level arrays and
/// settings object exist, and every subject and table carries its required
/// non-empty fields.
fn has_valid_shape(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let (Some(subjects), Some(tables)) = (
        obj.get("subjects").and_then(Value::as_array),
        obj.get("scheduleTables").and_then(Value::as_array),
    ) else {
        return false;
    };
    if !obj.get("settings").is_some_and(Value::is_object) {
        return false;
    }

    let subjects_ok = subjects
        .iter()
        .all(|s| ["id", "name", "stubCode", "color"].iter().all(|k| non_empty(s, k)));
    let tables_ok = tables.iter().all(|t| {
        non_empty(t, "id") && non_empty(t, "name") && t.get("slots").is_some_and(Value::is_array)
    });

    subjects_ok && tables_ok
}

fn non_empty(value: &Value, key: &str) -> bool {
    value
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}
