//! # Document Handle
//!
//! One schema document and its two views: the raw text and the typed tree.
//!
//! ## Synchronization
//!
//! ```text
//! set_text:  text ──parse──▶ Value ──validate──▶ report
//!                              └────try_from───▶ tree
//!
//! apply:     tree ──mutate──▶ tree ──serialize──▶ text
//! ```
//!
//! Exactly one direction runs per edit and the last edit wins. A document
//! can be memory-backed or file-backed (`load` / `save`).

use crate::options::EditorOptions;
use crate::{EditorError, Mutation, MutationError, MutationOutcome, MutationResult};
use schemaform_schema::{parse, ParseError, SchemaError, SchemaNode, SchemaType, Serializer};
use schemaform_validator::{SchemaValidator, ValidationReport};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Title of the built-in starting schema
pub const DEFAULT_TITLE: &str = "New Schema";

/// What happened to the tree after new text arrived
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The tree was replaced; the report may still contain errors
    Synced(ValidationReport),
    /// The text is not JSON; the tree is unchanged
    ParseFailed(ParseError),
    /// The text is JSON but not a schema tree; the tree is unchanged
    Rejected(ValidationReport),
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced(_))
    }
}

/// Editable schema document
#[derive(Debug)]
pub struct Document {
    /// Path to source file (if any)
    path: Option<PathBuf>,

    /// Raw text exactly as last written by either view
    text: String,

    root: SchemaNode,

    report: ValidationReport,

    /// Failure of the most recent text sync
    last_error: Option<SchemaError>,

    /// Current version number (increments each time the tree changes)
    version: u64,

    dirty: bool,

    options: EditorOptions,
    serializer: Serializer,
    validator: SchemaValidator,
}

impl Document {
    /// Create a memory-backed document holding the built-in default schema
    pub fn new(options: EditorOptions) -> Self {
        let root = Self::default_root(&options);
        let serializer = serializer_for(&options);
        let validator = SchemaValidator::new(options.validator);
        let text = serializer.serialize(&root);
        let report = validator.validate(&root.to_value());

        Self {
            path: None,
            text,
            root,
            report,
            last_error: None,
            version: 0,
            dirty: false,
            options,
            serializer,
            validator,
        }
    }

    /// Create a memory-backed document from schema text
    pub fn from_text(text: impl Into<String>, options: EditorOptions) -> Result<Self, SchemaError> {
        let text = text.into();
        let value = parse(&text)?;
        let root = SchemaNode::try_from(&value)?;
        let serializer = serializer_for(&options);
        let validator = SchemaValidator::new(options.validator);
        let report = validator.validate(&value);

        Ok(Self {
            path: None,
            text,
            root,
            report,
            last_error: None,
            version: 0,
            dirty: false,
            options,
            serializer,
            validator,
        })
    }

    /// Load a file-backed document
    pub fn load(path: impl AsRef<Path>, options: EditorOptions) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut document = Self::from_text(text, options)?;
        document.path = Some(path.to_path_buf());
        info!(path = %path.display(), "Loaded schema document");
        Ok(document)
    }

    /// The starting schema for new documents
    pub fn default_root(options: &EditorOptions) -> SchemaNode {
        let mut root = SchemaNode::default_for(SchemaType::Object).with_title(DEFAULT_TITLE);
        root.extra.insert(
            "$schema".to_string(),
            Value::from(options.validator.draft.meta_schema_uri()),
        );
        root
    }

    /// Text of the starting schema, as written by a new document
    pub fn default_text(options: &EditorOptions) -> String {
        serializer_for(options).serialize(&Self::default_root(options))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn last_error(&self) -> Option<&SchemaError> {
        self.last_error.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Take new raw text from the text view
    ///
    /// The text is stored verbatim. The tree is only replaced when the text
    /// parses and converts; validation errors alone do not block the sync.
    pub fn set_text(&mut self, text: impl Into<String>) -> SyncOutcome {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }

        let value = match parse(&self.text) {
            Ok(value) => value,
            Err(err) => {
                debug!(line = err.line, column = err.column, "Text sync failed to parse");
                self.last_error = Some(SchemaError::Parse(err.clone()));
                return SyncOutcome::ParseFailed(err);
            }
        };

        let mut report = self.validator.validate(&value);

        match SchemaNode::try_from(&value) {
            Ok(root) => {
                if root != self.root {
                    self.root = root;
                    self.version += 1;
                }
                self.report = report.clone();
                self.last_error = None;
                debug!(version = self.version, valid = report.valid, "Text synced to tree");
                SyncOutcome::Synced(report)
            }
            Err(err) => {
                debug!(error = %err, "Text sync rejected by tree conversion");
                report.push(schemaform_validator::Diagnostic::error(
                    "tree",
                    err.to_string(),
                    &schemaform_schema::SchemaPath::root(),
                ));
                self.report = report.clone();
                self.last_error = Some(err);
                SyncOutcome::Rejected(report)
            }
        }
    }

    /// Apply a mutation to the tree and regenerate the text
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        let outcome = mutation.apply(&mut self.root, &self.options)?;

        if let MutationOutcome::Applied { path } = &outcome {
            self.version += 1;
            debug!(
                version = self.version,
                %path,
                mutation = %mutation.describe(),
                "Applied mutation"
            );
            self.regenerate();
        }

        Ok(MutationResult {
            version: self.version,
            outcome,
        })
    }

    /// Replace the whole tree (undo, import, restore)
    pub fn replace_root(&mut self, root: SchemaNode) -> u64 {
        self.root = root;
        self.version += 1;
        self.regenerate();
        self.version
    }

    /// Tree → text, then re-validate
    fn regenerate(&mut self) {
        let value = self.root.to_value();
        self.text = self.serializer.serialize_value(&value);
        self.report = self.validator.validate(&value);
        self.last_error = None;
        self.dirty = true;
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.path.as_ref().ok_or(EditorError::NotFileBacked)?;
        std::fs::write(path, &self.text)?;
        self.dirty = false;
        info!(path = %path.display(), "Saved schema document");
        Ok(())
    }

    /// Make the document file-backed and save it
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        self.path = Some(path.into());
        self.save()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

fn serializer_for(options: &EditorOptions) -> Serializer {
    Serializer::with_indent(&" ".repeat(options.indent))
}
