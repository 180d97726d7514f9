use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use schemaform_editor::{Document, EditorOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Schema file to format
    pub file: PathBuf,

    /// Exit with an error if the file is not formatted
    #[arg(long)]
    pub check: bool,

    /// Print to stdout instead of rewriting the file
    #[arg(long)]
    pub stdout: bool,
}

pub fn format(args: FormatArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = cwd.join(&args.file);
    let source = fs::read_to_string(&path)?;
    let formatted = format_source(&source, config.editor_options())?;

    if args.stdout {
        print!("{}", formatted);
        return Ok(());
    }

    if formatted == source {
        println!("{} {} already formatted", "✓".green(), args.file.display());
        return Ok(());
    }

    if args.check {
        return Err(anyhow!("{} is not formatted", args.file.display()));
    }

    fs::write(&path, &formatted)?;
    println!("{} Formatted {}", "✓".green(), args.file.display());
    Ok(())
}

/// Canonical text of a schema, as the tree editor writes it
pub fn format_source(source: &str, options: EditorOptions) -> Result<String> {
    let document = Document::from_text(source, options)?;
    Ok(document.serializer().serialize(document.root()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_reindents() {
        let formatted = format_source(
            r#"{"type":"object","properties":{"a":{"type":"string"}}}"#,
            EditorOptions::default(),
        )
        .unwrap();
        assert_eq!(
            formatted,
            "{\n  \"type\": \"object\",\n  \"properties\": {\n    \"a\": {\n      \"type\": \"string\"\n    }\n  }\n}"
        );
    }

    #[test]
    fn test_format_rejects_unsupported_schema() {
        assert!(format_source(r#"{"type": "date"}"#, EditorOptions::default()).is_err());
    }

    #[test]
    fn test_check_mode() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("schema.json");
        fs::write(&file, r#"{"type":"string"}"#).unwrap();

        let check = |check| FormatArgs {
            file: PathBuf::from("schema.json"),
            check,
            stdout: false,
        };

        assert!(format(check(true), dir.path()).is_err());
        format(check(false), dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "{\n  \"type\": \"string\"\n}");
        format(check(true), dir.path()).unwrap();
    }
}
