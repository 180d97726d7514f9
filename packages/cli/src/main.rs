mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    autosave, format, init, prop, sample, validate, AutosaveCommand, FormatArgs, InitArgs,
    PropArgs, SampleArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// SchemaForm CLI - Edit and validate JSON Schema documents
#[derive(Parser, Debug)]
#[command(name = "schemaform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new SchemaForm project
    Init(InitArgs),

    /// Check schema files with the shape rules and the compile check
    Validate(ValidateArgs),

    /// Rewrite a schema file in canonical form
    Format(FormatArgs),

    /// Print example data for a schema
    Sample(SampleArgs),

    /// Edit the properties of a schema file
    Prop(PropArgs),

    /// Inspect or replace the autosaved schema
    Autosave {
        #[command(subcommand)]
        command: AutosaveCommand,
    },

    #[cfg(feature = "watch")]
    /// Follow autosave updates from other editor instances
    Watch(commands::WatchArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Validate(args) => validate(args, &cwd),
            Command::Format(args) => format(args, &cwd),
            Command::Sample(args) => sample(args, &cwd),
            Command::Prop(args) => prop(args, &cwd),
            Command::Autosave { command } => autosave(command, &cwd),

            #[cfg(feature = "watch")]
            Command::Watch(args) => commands::watch(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
