use crate::config::Config;
use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use schemaform_editor::{
    clear_autosave, EditSession, FileStore, MemoryClipboard, RecordStore, SyncOutcome,
    STORAGE_KEY,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Subcommand)]
pub enum AutosaveCommand {
    /// Print the autosaved schema
    Show,

    /// Replace the autosaved schema with a .json file
    Import { file: PathBuf },

    /// Write the autosaved schema to schema.json
    Export {
        /// Destination directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Delete the autosave record
    Clear,
}

pub fn autosave(command: AutosaveCommand, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = FileStore::new(config.storage_dir(cwd));

    match command {
        AutosaveCommand::Show => {
            let record = store
                .load(STORAGE_KEY)?
                .ok_or_else(|| anyhow!("No autosaved schema in {}", store.dir().display()))?;
            let saved_at = Utc
                .timestamp_millis_opt(record.last_modified)
                .single()
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| record.last_modified.to_string());
            eprintln!("{} {}", "Saved".dimmed(), saved_at.dimmed());
            println!("{}", record.json_schema_text);
        }
        AutosaveCommand::Import { file } => {
            let mut session = session(&config, store);
            match session.import(cwd.join(&file))? {
                SyncOutcome::Synced(report) if !report.valid => {
                    for error in &report.errors {
                        eprintln!("  {} {}", "error".red().bold(), error);
                    }
                }
                _ => {}
            }
            if session.flush(Utc::now()).is_none() {
                return Err(anyhow!("Failed to write the autosave record"));
            }
            println!("{} Imported {}", "✓".green(), file.display());
        }
        AutosaveCommand::Export { out_dir } => {
            let mut session = session(&config, store);
            if !session.restore() {
                return Err(anyhow!("No autosaved schema to export"));
            }
            let path = session.export_to(cwd.join(&out_dir))?;
            println!("{} Exported {}", "✓".green(), path.display());
        }
        AutosaveCommand::Clear => {
            let mut store = store;
            clear_autosave(&mut store)?;
            println!("{} Cleared autosave record", "✓".green());
        }
    }
    Ok(())
}

fn session(config: &Config, store: FileStore) -> EditSession {
    EditSession::new(
        config.editor_options(),
        Box::new(store),
        Box::new(MemoryClipboard::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_import_then_export() {
        let dir = tempfile::tempdir().unwrap();
        let text = r#"{"type": "object", "properties": {"id": {"type": "integer"}}}"#;
        fs::write(dir.path().join("input.json"), text).unwrap();

        autosave(
            AutosaveCommand::Import {
                file: PathBuf::from("input.json"),
            },
            dir.path(),
        )
        .unwrap();

        let record = FileStore::new(dir.path().join(".schemaform"))
            .load(STORAGE_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(record.json_schema_text, text);

        autosave(
            AutosaveCommand::Export {
                out_dir: PathBuf::from("out"),
            },
            dir.path(),
        )
        .unwrap_err();
        fs::create_dir(dir.path().join("out")).unwrap();
        autosave(
            AutosaveCommand::Export {
                out_dir: PathBuf::from("out"),
            },
            dir.path(),
        )
        .unwrap();

        let exported = fs::read_to_string(dir.path().join("out/schema.json")).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&exported).unwrap(),
            serde_json::from_str::<serde_json::Value>(text).unwrap()
        );

        autosave(AutosaveCommand::Clear, dir.path()).unwrap();
        assert!(autosave(AutosaveCommand::Show, dir.path()).is_err());
    }

    #[test]
    fn test_import_rejects_non_json_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("input.txt"), "{}").unwrap();
        assert!(autosave(
            AutosaveCommand::Import {
                file: PathBuf::from("input.txt"),
            },
            dir.path(),
        )
        .is_err());
    }

    #[test]
    fn test_export_without_record() {
        let dir = tempfile::tempdir().unwrap();
        assert!(autosave(
            AutosaveCommand::Export {
                out_dir: PathBuf::from("."),
            },
            dir.path(),
        )
        .is_err());
    }
}
