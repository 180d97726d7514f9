use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use schemaform_schema::{format_parse_error, parse};
use schemaform_validator::{validate as validate_schema, Draft, ValidationReport, ValidatorOptions};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file or directory of .json files
    #[arg(default_value = ".")]
    pub input: PathBuf,

    /// JSON Schema draft (overrides config)
    #[arg(short, long)]
    pub draft: Option<Draft>,

    /// Only run the shape rules
    #[arg(long)]
    pub no_compile: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Result of checking one file
#[derive(Debug)]
pub enum FileCheck {
    /// Not JSON; holds the rendered parse error
    ParseFailed(String),
    Checked(ValidationReport),
}

impl FileCheck {
    pub fn errors(&self) -> usize {
        match self {
            FileCheck::ParseFailed(_) => 1,
            FileCheck::Checked(report) => report.errors.len(),
        }
    }

    pub fn warnings(&self) -> usize {
        match self {
            FileCheck::ParseFailed(_) => 0,
            FileCheck::Checked(report) => report.warnings.len(),
        }
    }
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let options = ValidatorOptions {
        draft: args.draft.unwrap_or(config.draft),
        compile: !args.no_compile,
    };
    let input = cwd.join(&args.input);
    let json = args.format == "json";

    let files = if input.is_file() {
        vec![input]
    } else if input.is_dir() {
        find_json_files(&input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if !json {
        println!("🔍 {} SchemaForm validator ({})", "Starting".green().bold(), options.draft);
        println!("   Found {} schema files", files.len());
        println!();
    }

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for file in &files {
        let source = fs::read_to_string(file)?;
        let name = file.strip_prefix(cwd).unwrap_or(file).display().to_string();
        let check = check_source(&source, &name, options);
        total_errors += check.errors();
        total_warnings += check.warnings();

        if json {
            print_json(&name, &check)?;
        } else {
            print_text(&name, &check);
        }
    }

    if !json {
        println!();
        println!("   Files checked: {}", files.len());
        if total_errors > 0 {
            println!("   {} {}", "Errors:".red(), total_errors);
        }
        if total_warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), total_warnings);
        }
        if total_errors == 0 && total_warnings == 0 {
            println!("   {} No issues found!", "✓".green());
        }
    }

    if total_errors > 0 {
        return Err(anyhow!("{} validation error(s)", total_errors));
    }
    Ok(())
}

/// Parse and validate one schema text
pub fn check_source(source: &str, filename: &str, options: ValidatorOptions) -> FileCheck {
    match parse(source) {
        Ok(value) => FileCheck::Checked(validate_schema(&value, options)),
        Err(err) => FileCheck::ParseFailed(format_parse_error(source, filename, &err)),
    }
}

fn print_text(name: &str, check: &FileCheck) {
    match check {
        FileCheck::ParseFailed(rendered) => {
            eprintln!("{} Failed to parse {}", "✗".red(), name);
            eprintln!("{}", rendered);
        }
        FileCheck::Checked(report) if report.valid && !report.has_warnings() => {
            println!("{} {}", "✓".green(), name);
        }
        FileCheck::Checked(report) => {
            let mark = if report.valid { "✓".green() } else { "✗".red() };
            println!("{} {}", mark, name);
            for error in &report.errors {
                println!("  {} {}", "error".red().bold(), error);
            }
            for warning in &report.warnings {
                println!("  {} {}", "warning".yellow().bold(), warning);
            }
        }
    }
}

fn print_json(name: &str, check: &FileCheck) -> Result<()> {
    let value = match check {
        FileCheck::ParseFailed(rendered) => serde_json::json!({
            "file": name,
            "valid": false,
            "parseError": rendered,
        }),
        FileCheck::Checked(report) => serde_json::json!({
            "file": name,
            "valid": report.valid,
            "errors": report.errors,
            "warnings": report.warnings,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path.extension().is_some_and(|e| e == "json")
                && !path
                    .file_name()
                    .is_some_and(|name| name == crate::config::DEFAULT_CONFIG_NAME)
        })
        .collect();
    files.sort();
    files
}
