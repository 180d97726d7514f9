//! # SchemaForm Editor
//!
//! Editing engine for JSON Schema documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: text ⇄ Value ⇄ SchemaNode tree      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Text ↔ tree synchronization              │
//! │  - Validated mutations, undo/redo           │
//! │  - Drag-and-drop sort and nest              │
//! │  - Autosave, clipboard, import/export       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ validator: shape rules + compile check      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One direction per edit**: text edits rebuild the tree, tree edits
//!    rewrite the text; the last edit wins
//! 2. **Whole-node replacement**: every change is a new value at a path
//! 3. **Explicit ownership**: an [`EditSession`] owns all state and reports
//!    changes to registered listeners
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemaform_editor::{Document, EditorOptions, Mutation};
//! use schemaform_schema::{SchemaPath, SchemaType};
//!
//! let mut doc = Document::load("schema.json", EditorOptions::default())?;
//!
//! doc.apply(&Mutation::AddProperty {
//!     path: SchemaPath::root(),
//!     name: Some("email".to_string()),
//!     schema_type: SchemaType::String,
//! })?;
//!
//! doc.save()?;
//! ```

mod clipboard;
mod document;
mod drag;
mod errors;
mod mutations;
mod options;
mod session;
mod storage;
mod transfer;
mod undo_stack;

#[cfg(feature = "watch")]
mod watcher;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use document::{Document, SyncOutcome, DEFAULT_TITLE};
pub use drag::{Bounds, DragController, DragError, DragPhase, DragState, DropIntent, Placeholder};
pub use errors::EditorError;
pub use mutations::{
    fits_depth, DropPosition, Field, Mutation, MutationError, MutationOutcome, MutationResult,
    NEW_PROPERTY_KEY,
};
pub use options::EditorOptions;
pub use session::{ChangeEvent, ChangeOrigin, EditSession, Notice, NoticeLevel};
pub use storage::{
    clear as clear_autosave, restorable, Autosaver, FileStore, MemoryStore, RecordStore,
    StorageError, StorageRecord, STORAGE_KEY,
};
pub use transfer::{check_extension, read_import, ExportFile, TransferError, EXPORT_FILENAME, EXPORT_MIME};
pub use undo_stack::{UndoEntry, UndoStack};

#[cfg(feature = "watch")]
pub use watcher::StorageWatcher;
