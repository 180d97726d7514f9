use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use schemaform_editor::{Document, EditorOptions};
use schemaform_schema::generate_sample;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Schema file to generate data for
    pub file: PathBuf,

    /// Write the sample to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn sample(args: SampleArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = fs::read_to_string(cwd.join(&args.file))?;
    let text = sample_text(&source, config.editor_options())?;

    match args.output {
        Some(output) => {
            fs::write(cwd.join(&output), &text)?;
            println!("{} Wrote sample to {}", "✓".green(), output.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// Pretty-printed example instance of a schema
pub fn sample_text(source: &str, options: EditorOptions) -> Result<String> {
    let document = Document::from_text(source, options)?;
    let sample = generate_sample(document.root());
    Ok(document.serializer().serialize_value(&sample))
}
