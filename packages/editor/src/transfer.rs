//! File import and export

use crate::Document;
use schemaform_schema::SchemaError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const EXPORT_FILENAME: &str = "schema.json";
pub const EXPORT_MIME: &str = "application/json";

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Only .json files can be imported: {0}")]
    UnsupportedExtension(PathBuf),

    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

/// A download-ready copy of the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// Pretty-printed text of the document's tree
    pub fn from_document(document: &Document) -> Self {
        Self {
            filename: EXPORT_FILENAME,
            mime: EXPORT_MIME,
            contents: document.serializer().serialize(document.root()),
        }
    }

    /// Write into `dir` under the export filename
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, TransferError> {
        let path = dir.as_ref().join(self.filename);
        std::fs::write(&path, &self.contents)?;
        info!(path = %path.display(), "Exported schema");
        Ok(path)
    }
}

/// Only `.json` files (any case) can be imported
pub fn check_extension(path: &Path) -> Result<(), TransferError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(())
    } else {
        Err(TransferError::UnsupportedExtension(path.to_path_buf()))
    }
}

/// Read a `.json` file as UTF-8 text
pub fn read_import(path: impl AsRef<Path>) -> Result<String, TransferError> {
    let path = path.as_ref();
    check_extension(path)?;

    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| TransferError::InvalidUtf8(path.to_path_buf()))
}
