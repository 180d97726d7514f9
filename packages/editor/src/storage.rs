//! # Local Persistence
//!
//! The autosave record, the stores that hold it and the debounced saver.
//!
//! A record is one JSON object under a fixed key:
//!
//! ```json
//! { "jsonSchemaText": "...", "lastModified": 1718000000000 }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Key every editor instance saves under
pub const STORAGE_KEY: &str = "schemaform.autosave";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt record '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[cfg(feature = "watch")]
    #[error("Failed to watch storage: {0}")]
    Watch(#[from] notify::Error),
}

/// Persisted autosave entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecord {
    pub json_schema_text: String,

    /// Milliseconds since the Unix epoch
    pub last_modified: i64,
}

impl StorageRecord {
    pub fn new(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            json_schema_text: text.into(),
            last_modified: at.timestamp_millis(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.json_schema_text.trim().is_empty()
    }
}

/// Key-value storage for records
pub trait RecordStore {
    fn load(&self, key: &str) -> Result<Option<StorageRecord>, StorageError>;

    fn save(&mut self, key: &str, record: &StorageRecord) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Stores each record as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl RecordStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<StorageRecord>, StorageError> {
        let text = match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn save(&mut self, key: &str, record: &StorageRecord) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(record).map_err(StorageError::Encode)?;
        std::fs::write(self.path_for(key), text)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, StorageRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<StorageRecord>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, record: &StorageRecord) -> Result<(), StorageError> {
        self.records.insert(key.to_string(), record.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.records.remove(key);
        Ok(())
    }
}

/// Record worth restoring on load
///
/// Blank records and records holding the built-in default text are ignored.
pub fn restorable(
    store: &dyn RecordStore,
    default_text: &str,
) -> Result<Option<StorageRecord>, StorageError> {
    Ok(store
        .load(STORAGE_KEY)?
        .filter(|record| !record.is_blank() && record.json_schema_text != default_text))
}

#[derive(Debug, Clone)]
struct PendingSave {
    text: String,
    due: DateTime<Utc>,
}

/// Debounced writer of the autosave record
///
/// Polled: `schedule` on every change, `tick` from the host loop. A save is
/// written once no change has arrived for the debounce period.
#[derive(Debug, Clone)]
pub struct Autosaver {
    debounce: Duration,
    pending: Option<PendingSave>,
    last_saved: Option<i64>,
}

impl Autosaver {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce: Duration::milliseconds(i64::try_from(debounce_ms).unwrap_or(i64::MAX)),
            pending: None,
            last_saved: None,
        }
    }

    /// Queue `text`, postponing any earlier pending save
    pub fn schedule(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.pending = Some(PendingSave {
            text: text.into(),
            due: self.due(now),
        });
    }

    fn due(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.debounce)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// `lastModified` of the newest record this saver wrote
    pub fn last_saved(&self) -> Option<i64> {
        self.last_saved
    }

    /// Note a record written elsewhere so it is not mistaken for news
    pub fn observe(&mut self, record: &StorageRecord) {
        self.last_saved = Some(
            self.last_saved
                .map_or(record.last_modified, |saved| saved.max(record.last_modified)),
        );
    }

    /// Write the pending save if its debounce period has elapsed
    pub fn tick(
        &mut self,
        now: DateTime<Utc>,
        store: &mut dyn RecordStore,
    ) -> Result<Option<StorageRecord>, StorageError> {
        let due = matches!(&self.pending, Some(pending) if pending.due <= now);
        if due {
            self.flush(now, store)
        } else {
            Ok(None)
        }
    }

    /// Write the pending save immediately
    pub fn flush(
        &mut self,
        now: DateTime<Utc>,
        store: &mut dyn RecordStore,
    ) -> Result<Option<StorageRecord>, StorageError> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };

        let record = StorageRecord::new(pending.text, now);
        if let Err(err) = store.save(STORAGE_KEY, &record) {
            // Keep the text so the next tick retries
            self.pending = Some(PendingSave {
                text: record.json_schema_text,
                due: self.due(now),
            });
            return Err(err);
        }

        debug!(last_modified = record.last_modified, "Autosaved schema");
        self.observe(&record);
        Ok(Some(record))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for Autosaver {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Clear the autosave record
pub fn clear(store: &mut dyn RecordStore) -> Result<(), StorageError> {
    store.remove(STORAGE_KEY)?;
    info!("Cleared autosave record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_record_wire_format() {
        let record = StorageRecord::new("{}", at(1_700_000_000_000));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"jsonSchemaText": "{}", "lastModified": 1_700_000_000_000i64})
        );
    }

    #[test]
    fn test_debounce() {
        let mut store = MemoryStore::new();
        let mut saver = Autosaver::new(1000);

        saver.schedule("one", at(0));
        saver.schedule("two", at(600));
        assert!(saver.tick(at(1200), &mut store).unwrap().is_none());

        let record = saver.tick(at(1600), &mut store).unwrap().unwrap();
        assert_eq!(record.json_schema_text, "two");
        assert_eq!(record.last_modified, 1600);
        assert!(!saver.is_pending());
        assert_eq!(store.load(STORAGE_KEY).unwrap(), Some(record));
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.load(STORAGE_KEY).unwrap(), None);

        let record = StorageRecord::new("{\"type\": \"string\"}", at(5));
        store.save(STORAGE_KEY, &record).unwrap();
        assert!(store.path_for(STORAGE_KEY).ends_with("schemaform.autosave.json"));
        assert_eq!(store.load(STORAGE_KEY).unwrap(), Some(record));

        clear(&mut store).unwrap();
        assert_eq!(store.load(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path_for(STORAGE_KEY), "not json").unwrap();
        assert!(matches!(
            store.load(STORAGE_KEY),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_restorable_skips_default_and_blank() {
        let mut store = MemoryStore::new();
        assert_eq!(restorable(&store, "default").unwrap(), None);

        store.save(STORAGE_KEY, &StorageRecord::new("  ", at(1))).unwrap();
        assert_eq!(restorable(&store, "default").unwrap(), None);

        store.save(STORAGE_KEY, &StorageRecord::new("default", at(2))).unwrap();
        assert_eq!(restorable(&store, "default").unwrap(), None);

        let record = StorageRecord::new("{\"type\": \"boolean\"}", at(3));
        store.save(STORAGE_KEY, &record).unwrap();
        assert_eq!(restorable(&store, "default").unwrap(), Some(record));
    }
}
