//! Browser-side implementations of the editor's host traits

use schemaform_editor::{Clipboard, ClipboardError, RecordStore, StorageError, StorageRecord};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Records kept in `window.localStorage`
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// The window's local storage, if the page may use it
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

fn unavailable(action: &str) -> StorageError {
    StorageError::Io(io::Error::new(
        io::ErrorKind::Other,
        format!("localStorage {} failed", action),
    ))
}

impl RecordStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<StorageRecord>, StorageError> {
        let Some(text) = self.storage.get_item(key).map_err(|_| unavailable("read"))? else {
            return Ok(None);
        };
        parse_record(key, &text).map(Some)
    }

    fn save(&mut self, key: &str, record: &StorageRecord) -> Result<(), StorageError> {
        let text = serde_json::to_string(record).map_err(StorageError::Encode)?;
        self.storage
            .set_item(key, &text)
            .map_err(|_| unavailable("write"))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|_| unavailable("remove"))
    }
}

/// Decode a record as written under `key`
pub fn parse_record(key: &str, text: &str) -> Result<StorageRecord, StorageError> {
    serde_json::from_str(text).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })
}

/// Clipboard contents handed over by the page
///
/// Browser clipboard access is asynchronous, so the page reads and writes
/// `navigator.clipboard` itself and exchanges text through this buffer.
#[derive(Debug, Clone, Default)]
pub struct HostClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl HostClipboard {
    pub fn set(&self, text: impl Into<String>) {
        *self.contents.borrow_mut() = Some(text.into());
    }

    pub fn take(&self) -> Option<String> {
        self.contents.borrow_mut().take()
    }
}

impl Clipboard for HostClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.contents.borrow().clone().ok_or(ClipboardError::Empty)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set(text);
        Ok(())
    }
}
