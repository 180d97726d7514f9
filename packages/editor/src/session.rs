//! # Edit Session Management
//!
//! The single owner of one editor instance's state.
//!
//! An EditSession wires the document to undo history, the drag controller,
//! autosave, the clipboard and file transfer. Failures never escape as
//! fatal errors: each one is also queued as a transient [`Notice`] for the
//! host to display. Hosts observe changes through [`EditSession::on_change`].

use crate::clipboard::{Clipboard, ClipboardError, MemoryClipboard};
use crate::drag::{Bounds, DragController, DragError, DropIntent};
use crate::storage::{restorable, Autosaver, MemoryStore, RecordStore, StorageRecord, STORAGE_KEY};
use crate::transfer::{check_extension, read_import, ExportFile, TransferError};
use crate::{Document, EditorOptions, Mutation, MutationError, MutationResult, SyncOutcome, UndoStack};
use chrono::{DateTime, Utc};
use schemaform_schema::{generate_sample, parse_schema, SchemaPath};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Which action changed the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrigin {
    Text,
    Tree,
    Drag,
    Undo,
    Redo,
    Import,
    Paste,
    Restore,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub origin: ChangeOrigin,
    pub version: u64,
}

type ChangeListener = Box<dyn FnMut(&ChangeEvent)>;

/// Editing state of one editor instance
pub struct EditSession {
    document: Document,
    undo: UndoStack,
    drag: DragController,
    autosaver: Autosaver,
    store: Box<dyn RecordStore>,
    clipboard: Box<dyn Clipboard>,
    notices: Vec<Notice>,
    listeners: Vec<ChangeListener>,
}

impl EditSession {
    /// Create a session over a new default document
    pub fn new(
        options: EditorOptions,
        store: Box<dyn RecordStore>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self::with_document(Document::new(options), store, clipboard)
    }

    pub fn with_document(
        document: Document,
        store: Box<dyn RecordStore>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let options = document.options();
        Self {
            undo: UndoStack::with_max_levels(options.undo_levels),
            autosaver: Autosaver::new(options.autosave_debounce_ms),
            drag: DragController::new(),
            document,
            store,
            clipboard,
            notices: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Session backed by an in-memory store and clipboard
    pub fn in_memory(options: EditorOptions) -> Self {
        Self::new(
            options,
            Box::new(MemoryStore::new()),
            Box::new(MemoryClipboard::new()),
        )
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn autosaver(&self) -> &Autosaver {
        &self.autosaver
    }

    /// Register a listener called after every successful change
    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return every queued notice
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn emit(&mut self, origin: ChangeOrigin) {
        let event = ChangeEvent {
            origin,
            version: self.document.version(),
        };
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn schedule_autosave(&mut self) {
        self.autosaver.schedule(self.document.text(), Utc::now());
    }

    /// New text from the text view
    pub fn set_text(&mut self, text: impl Into<String>) -> SyncOutcome {
        self.sync_text(text.into(), ChangeOrigin::Text)
    }

    fn sync_text(&mut self, text: String, origin: ChangeOrigin) -> SyncOutcome {
        let before = self.document.root().clone();
        let outcome = self.document.set_text(text);

        if origin != ChangeOrigin::External && origin != ChangeOrigin::Restore {
            self.schedule_autosave();
        }

        match &outcome {
            SyncOutcome::Synced(_) => {
                let description = match origin {
                    ChangeOrigin::Import => "Import schema",
                    ChangeOrigin::Paste => "Paste schema",
                    ChangeOrigin::External => "Update from another window",
                    _ => "Edit text",
                };
                if origin != ChangeOrigin::Restore {
                    self.undo.record(
                        before,
                        self.document.root().clone(),
                        Some(description.to_string()),
                    );
                }
                self.emit(origin);
            }
            SyncOutcome::ParseFailed(err) => {
                self.notify(Notice::error(err.to_string()));
            }
            SyncOutcome::Rejected(_) => {
                let message = self
                    .document
                    .last_error()
                    .map(|err| err.to_string())
                    .unwrap_or_else(|| "Schema rejected".to_string());
                self.notify(Notice::error(message));
            }
        }

        outcome
    }

    /// Apply a tree edit with undo support
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        match self.undo.apply(mutation, &mut self.document) {
            Ok(result) => {
                if result.changed() {
                    self.schedule_autosave();
                    self.emit(ChangeOrigin::Tree);
                }
                Ok(result)
            }
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.undo.undo(&mut self.document);
        if undone {
            self.schedule_autosave();
            self.emit(ChangeOrigin::Undo);
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.undo.redo(&mut self.document);
        if redone {
            self.schedule_autosave();
            self.emit(ChangeOrigin::Redo);
        }
        redone
    }

    pub fn start_drag(&mut self, path: SchemaPath) -> Result<(), DragError> {
        let result = self.drag.start(&self.document, path);
        if let Err(err) = &result {
            self.notify(Notice::error(err.to_string()));
        }
        result
    }

    /// Classify the drop intent over `target`; `None` means drop disallowed
    pub fn hover_drag(&mut self, target: &SchemaPath, cursor_y: f64, bounds: Bounds) -> Option<DropIntent> {
        match self.drag.hover(target, cursor_y, bounds) {
            Ok(intent) => intent,
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                None
            }
        }
    }

    pub fn leave_drag(&mut self) {
        self.drag.leave();
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    /// Finish the drag, applying the hovered sort or nest
    pub fn drop_drag(&mut self) -> Result<MutationResult, DragError> {
        let result = self
            .drag
            .drop_mutation(&self.document)
            .and_then(|mutation| {
                self.undo
                    .apply(&mutation, &mut self.document)
                    .map_err(DragError::Refused)
            });

        match &result {
            Ok(result) if result.changed() => {
                self.schedule_autosave();
                self.emit(ChangeOrigin::Drag);
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "Drop failed");
                self.notify(Notice::error(err.to_string()));
            }
        }
        result
    }

    /// Copy the raw text verbatim
    pub fn copy(&mut self) -> Result<(), ClipboardError> {
        let result = self.clipboard.write_text(self.document.text());
        match &result {
            Ok(()) => self.notify(Notice::success("Schema copied to clipboard")),
            Err(err) => self.notify(Notice::error(err.to_string())),
        }
        result
    }

    /// Replace the raw text with the clipboard contents
    pub fn paste(&mut self) -> Result<SyncOutcome, ClipboardError> {
        match self.clipboard.read_text() {
            Ok(text) => Ok(self.sync_text(text, ChangeOrigin::Paste)),
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Generate example data and copy it to the clipboard
    pub fn copy_sample(&mut self) -> Result<Value, ClipboardError> {
        let sample = generate_sample(self.document.root());
        let text = self.document.serializer().serialize_value(&sample);
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                self.notify(Notice::success("Sample data copied to clipboard"));
                Ok(sample)
            }
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn export(&self) -> ExportFile {
        ExportFile::from_document(&self.document)
    }

    pub fn export_to(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf, TransferError> {
        let result = self.export().write_to(dir);
        match &result {
            Ok(path) => self.notify(Notice::success(format!("Exported {}", path.display()))),
            Err(err) => self.notify(Notice::error(err.to_string())),
        }
        result
    }

    /// Replace the schema with a `.json` file's contents
    ///
    /// Nothing changes unless the file holds a valid schema tree.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<SyncOutcome, TransferError> {
        let path = path.as_ref();
        match read_import(path) {
            Ok(text) => self.import_text(path, text),
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Import a file the host has already read, named `name`
    pub fn import_text(
        &mut self,
        name: impl AsRef<Path>,
        text: impl Into<String>,
    ) -> Result<SyncOutcome, TransferError> {
        let name = name.as_ref();
        let text = text.into();
        let checked = check_extension(name).and_then(|()| {
            parse_schema(&text)?;
            Ok(())
        });
        if let Err(err) = checked {
            self.notify(Notice::error(err.to_string()));
            return Err(err);
        }

        info!(file = %name.display(), "Importing schema");
        let outcome = self.sync_text(text, ChangeOrigin::Import);
        self.notify(Notice::success(format!("Imported {}", name.display())));
        Ok(outcome)
    }

    /// Load the autosaved schema, if there is one worth restoring
    pub fn restore(&mut self) -> bool {
        let default_text = Document::default_text(self.document.options());
        match restorable(self.store.as_ref(), &default_text) {
            Ok(Some(record)) => {
                self.autosaver.observe(&record);
                let outcome = self.sync_text(record.json_schema_text, ChangeOrigin::Restore);
                let restored = outcome.is_synced();
                if restored {
                    self.notify(Notice::info("Restored autosaved schema"));
                }
                restored
            }
            Ok(None) => false,
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                false
            }
        }
    }

    /// Write the pending autosave once its debounce period has passed
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<StorageRecord> {
        match self.autosaver.tick(now, self.store.as_mut()) {
            Ok(record) => record,
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                None
            }
        }
    }

    /// Write the pending autosave now
    pub fn flush(&mut self, now: DateTime<Utc>) -> Option<StorageRecord> {
        match self.autosaver.flush(now, self.store.as_mut()) {
            Ok(record) => record,
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                None
            }
        }
    }

    /// Take a record written by another editor instance
    ///
    /// Applied only when it is newer than anything seen so far and its text
    /// differs from the current text.
    pub fn apply_external(&mut self, record: StorageRecord) -> bool {
        let newer = self
            .autosaver
            .last_saved()
            .map_or(true, |seen| record.last_modified > seen);
        if !newer || record.json_schema_text == self.document.text() {
            return false;
        }

        self.autosaver.observe(&record);
        let outcome = self.sync_text(record.json_schema_text, ChangeOrigin::External);
        if outcome.is_synced() {
            self.notify(Notice::info("Schema updated from another window"));
        }
        true
    }

    /// Re-read the record store after a change notification
    pub fn reload_from_store(&mut self) -> bool {
        match self.store.load(STORAGE_KEY) {
            Ok(Some(record)) => self.apply_external(record),
            Ok(None) => false,
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                false
            }
        }
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("document", &self.document)
            .field("undo", &self.undo)
            .field("drag", &self.drag)
            .field("notices", &self.notices)
            .field("listeners", &format!("{} listeners", self.listeners.len()))
            .finish()
    }
}
