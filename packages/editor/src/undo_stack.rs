//! # Undo/Redo Stack
//!
//! Tracks tree history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each entry holds full snapshots of the tree before and after a change
//! - Undo restores the `before` snapshot and moves the entry to redo
//! - Redo restores the `after` snapshot
//! - New entries clear the redo stack
//! - Supports batched operations (group multiple changes as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut doc = Document::default();
//!
//! stack.apply(&mutation, &mut doc)?;
//! stack.undo(&mut doc);
//! stack.redo(&mut doc);
//! ```

use crate::{Document, Mutation, MutationError, MutationResult};
use schemaform_schema::SchemaNode;

/// One undoable step
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    pub before: SchemaNode,
    pub after: SchemaNode,

    /// Optional description of this step
    pub description: Option<String>,
}

impl UndoEntry {
    pub fn new(before: SchemaNode, after: SchemaNode) -> Self {
        Self {
            before,
            after,
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Default)]
struct OpenBatch {
    before: Option<SchemaNode>,
    after: Option<SchemaNode>,
    description: Option<String>,
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied steps (most recent last)
    undo_stack: Vec<UndoEntry>,

    /// Undone steps (most recent last)
    redo_stack: Vec<UndoEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    ///
    /// Mutations that leave the tree unchanged are not recorded.
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        doc: &mut Document,
    ) -> Result<MutationResult, MutationError> {
        let before = doc.root().clone();
        let result = doc.apply(mutation)?;

        if result.changed() {
            self.record(before, doc.root().clone(), Some(mutation.describe()));
        }

        Ok(result)
    }

    /// Record a change made outside [`UndoStack::apply`]
    pub fn record(&mut self, before: SchemaNode, after: SchemaNode, description: Option<String>) {
        if before == after {
            return;
        }

        if let Some(batch) = &mut self.current_batch {
            // A batch keeps its first `before` and its last `after`
            if batch.before.is_none() {
                batch.before = Some(before);
            }
            batch.after = Some(after);
            if batch.description.is_none() {
                batch.description = description;
            }
        } else {
            let mut entry = UndoEntry::new(before, after);
            entry.description = description;
            self.push_entry(entry);
        }
    }

    /// Start a batch of changes (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(OpenBatch::default());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let (Some(before), Some(after)) = (batch.before, batch.after) {
                if before != after {
                    self.push_entry(UndoEntry {
                        before,
                        after,
                        description: batch.description,
                    });
                }
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: UndoEntry) {
        self.undo_stack.push(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Undo the most recent step
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        self.end_batch();

        match self.undo_stack.pop() {
            Some(entry) => {
                doc.replace_root(entry.before.clone());
                self.redo_stack.push(entry);
                true
            }
            None => false, // Nothing to undo
        }
    }

    /// Redo the most recently undone step
    pub fn redo(&mut self, doc: &mut Document) -> bool {
        match self.redo_stack.pop() {
            Some(entry) => {
                doc.replace_root(entry.after.clone());
                self.undo_stack.push(entry);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
