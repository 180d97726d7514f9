use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use schemaform_editor::{
    Document, DropPosition, EditorOptions, Field, Mutation, MutationOutcome, MutationResult,
};
use schemaform_schema::{SchemaPath, SchemaType};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct PropArgs {
    /// Schema file to edit in place
    pub file: PathBuf,

    #[command(subcommand)]
    pub action: PropAction,
}

/// Structural edits; paths are JSON pointers such as `/properties/address`
#[derive(Debug, Subcommand)]
pub enum PropAction {
    /// Add a property to an object
    Add {
        /// Property name (defaults to a generated unique name)
        name: Option<String>,

        #[arg(short = 't', long = "type", default_value = "string")]
        schema_type: SchemaType,

        /// Object to add to
        #[arg(long, default_value = "/")]
        at: SchemaPath,
    },

    /// Remove a property
    Remove {
        name: String,

        #[arg(long, default_value = "/")]
        at: SchemaPath,
    },

    /// Rename a property in place
    Rename {
        from: String,
        to: String,

        #[arg(long, default_value = "/")]
        at: SchemaPath,
    },

    /// Mark a property required (or optional)
    Require {
        name: String,

        #[arg(long)]
        optional: bool,

        #[arg(long, default_value = "/")]
        at: SchemaPath,
    },

    /// Change the type of a node
    Type {
        path: SchemaPath,
        schema_type: SchemaType,
    },

    /// Change the item type of an array node
    Items {
        path: SchemaPath,
        schema_type: SchemaType,
    },

    /// Set a keyword on a node; omit the value to clear it
    Set {
        path: SchemaPath,
        field: Field,
        value: Option<String>,
    },

    /// Move a property into another object
    Move {
        name: String,

        /// Object the property lives in
        #[arg(long, default_value = "/")]
        from: SchemaPath,

        /// Destination object
        #[arg(long)]
        into: SchemaPath,
    },

    /// Reorder a property next to a sibling
    Sort {
        name: String,

        #[arg(long, conflicts_with = "after", required_unless_present = "after")]
        before: Option<String>,

        #[arg(long)]
        after: Option<String>,

        #[arg(long, default_value = "/")]
        at: SchemaPath,
    },
}

impl PropAction {
    pub fn mutation(self) -> Result<Mutation> {
        let mutation = match self {
            PropAction::Add {
                name,
                schema_type,
                at,
            } => Mutation::AddProperty {
                path: at,
                name,
                schema_type,
            },
            PropAction::Remove { name, at } => Mutation::RemoveProperty { path: at, name },
            PropAction::Rename { from, to, at } => Mutation::RenameProperty { path: at, from, to },
            PropAction::Require { name, optional, at } => Mutation::SetRequired {
                path: at,
                name,
                required: !optional,
            },
            PropAction::Type { path, schema_type } => Mutation::ChangeType { path, schema_type },
            PropAction::Items { path, schema_type } => Mutation::SetItemType { path, schema_type },
            PropAction::Set { path, field, value } => Mutation::SetField {
                path,
                field,
                value: value.map(|raw| parse_value(&raw)),
            },
            PropAction::Move { name, from, into } => Mutation::NestProperty {
                from,
                key: name,
                to: into,
            },
            PropAction::Sort {
                name,
                before,
                after,
                at,
            } => {
                let (target, position) = match (before, after) {
                    (Some(target), _) => (target, DropPosition::Before),
                    (None, Some(target)) => (target, DropPosition::After),
                    (None, None) => return Err(anyhow!("sort needs --before or --after")),
                };
                Mutation::SortProperty {
                    parent: at,
                    key: name,
                    target,
                    position,
                }
            }
        };
        Ok(mutation)
    }
}

/// JSON literal if it parses as one, otherwise the raw string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn prop(args: PropArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mutation = args.action.mutation()?;
    let description = mutation.describe();
    let result = edit_file(&cwd.join(&args.file), &mutation, config.editor_options())?;

    match result.outcome {
        MutationOutcome::Applied { path } => {
            println!("{} {} ({})", "✓".green(), description, path.to_string().dimmed());
        }
        MutationOutcome::Unchanged => {
            println!("{} Nothing to change", "•".dimmed());
        }
    }
    Ok(())
}

/// Apply one mutation to a schema file, saving it if the tree changed
pub fn edit_file(path: &Path, mutation: &Mutation, options: EditorOptions) -> Result<MutationResult> {
    let mut document = Document::load(path, options)?;
    let result = document.apply(mutation)?;
    if result.changed() {
        document.save()?;
    }

    let report = document.report();
    for warning in &report.warnings {
        eprintln!("  {} {}", "warning".yellow().bold(), warning);
    }
    for error in &report.errors {
        eprintln!("  {} {}", "error".red().bold(), error);
    }
    Ok(result)
}
