use schemaform_schema::MAX_DEPTH;
use schemaform_validator::ValidatorOptions;

/// Tunables shared by the document, undo stack and autosaver
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Spaces per indentation level in generated text
    pub indent: usize,

    /// Deepest level a structural move may produce
    pub max_depth: usize,

    /// Maximum number of undo levels (0 = unlimited)
    pub undo_levels: usize,

    /// Quiet period before an edit is written to the record store
    pub autosave_debounce_ms: u64,

    pub validator: ValidatorOptions,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            max_depth: MAX_DEPTH,
            undo_levels: 100,
            autosave_debounce_ms: 1000,
            validator: ValidatorOptions::default(),
        }
    }
}
