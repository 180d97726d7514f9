use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use schemaform_editor::{
    Document, EditSession, FileStore, MemoryClipboard, StorageWatcher, STORAGE_KEY,
};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Print the full schema text on every change
    #[arg(long)]
    pub print: bool,

    /// Polling interval in milliseconds
    #[arg(long, default_value_t = 500)]
    pub interval: u64,
}

/// Follow the autosave record written by other editor instances
pub fn watch(args: WatchArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = FileStore::new(config.storage_dir(cwd));
    let watcher = StorageWatcher::new(&store, STORAGE_KEY)?;

    println!(
        "👀 {} {}",
        "Watching".green().bold(),
        store.path_for(STORAGE_KEY).display()
    );

    let mut session = EditSession::new(
        config.editor_options(),
        Box::new(store),
        Box::new(MemoryClipboard::new()),
    );
    if session.restore() {
        print_update(session.document(), args.print);
    }

    let interval = Duration::from_millis(args.interval.max(1));
    loop {
        if !watcher.wait_changed(interval) {
            continue;
        }
        debug!("Autosave record changed");
        if session.reload_from_store() {
            print_update(session.document(), args.print);
        }
        for notice in session.take_notices() {
            debug!(message = %notice.message, "Notice");
        }
    }
}

fn print_update(document: &Document, print: bool) {
    println!("{}", summary(document));
    let report = document.report();
    for error in &report.errors {
        println!("  {} {}", "error".red().bold(), error);
    }
    for warning in &report.warnings {
        println!("  {} {}", "warning".yellow().bold(), warning);
    }
    if print {
        println!("{}", document.text());
    }
}

/// One-line description of the current schema
pub fn summary(document: &Document) -> String {
    let root = document.root();
    let properties = root
        .as_object()
        .map(|object| object.properties.len())
        .unwrap_or(0);
    let status = if document.report().valid {
        "valid".green()
    } else {
        "invalid".red()
    };
    format!(
        "{} v{} {} schema, {} top-level properties, {}",
        "↻".blue(),
        document.version(),
        root.schema_type(),
        properties,
        status
    )
}
