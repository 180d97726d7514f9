//! Error types for the editor

use crate::clipboard::ClipboardError;
use crate::drag::DragError;
use crate::mutations::MutationError;
use crate::storage::StorageError;
use crate::transfer::TransferError;
use schemaform_schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Drag error: {0}")]
    Drag(#[from] DragError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
