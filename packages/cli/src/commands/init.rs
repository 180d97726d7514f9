use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use schemaform_editor::Document;
use schemaform_validator::Draft;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Starter schema file to create
    #[arg(short, long, default_value = "schema.json")]
    pub schema: String,

    /// JSON Schema draft (draft-04, draft-06, draft-07, 2019-09, 2020-12)
    #[arg(short, long, default_value = "draft-07")]
    pub draft: Draft,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing SchemaForm project...".bright_blue().bold()
    );

    let config = Config {
        draft: args.draft,
        ..Config::default()
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Create starter schema
    let schema_path = cwd.join(&args.schema);
    if !schema_path.exists() {
        fs::write(&schema_path, Document::default_text(&config.editor_options()))?;
        println!("  {} Created {}", "✓".green(), args.schema);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: schemaform prop {} add name --type string", args.schema);
    println!("  2. Run: schemaform validate {}", args.schema);
    println!("  3. Run: schemaform sample {}", args.schema);

    Ok(())
}
