use schemaform_editor::EditorOptions;
use schemaform_schema::MAX_DEPTH;
use schemaform_validator::{Draft, ValidatorOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "schemaform.config.json";

/// SchemaForm configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Spaces per indentation level when writing schemas
    pub indent: usize,

    /// Draft used to compile schemas
    pub draft: Draft,

    /// Deepest nesting a `prop move` may produce
    pub max_depth: usize,

    pub undo_levels: usize,

    pub autosave_debounce_ms: u64,

    /// Directory holding the autosave record
    pub storage_dir: String,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            indent: self.indent,
            max_depth: self.max_depth,
            undo_levels: self.undo_levels,
            autosave_debounce_ms: self.autosave_debounce_ms,
            validator: ValidatorOptions {
                draft: self.draft,
                ..ValidatorOptions::default()
            },
        }
    }

    /// Get absolute path to the storage directory
    pub fn storage_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.storage_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        let options = EditorOptions::default();
        Self {
            indent: options.indent,
            draft: options.validator.draft,
            max_depth: MAX_DEPTH,
            undo_levels: options.undo_levels,
            autosave_debounce_ms: options.autosave_debounce_ms,
            storage_dir: ".schemaform".to_string(),
        }
    }
}
