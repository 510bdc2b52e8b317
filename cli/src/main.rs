mod cli;
mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{BackendKind, Config};
use notekeep_core::{FileBackend, MemoryBackend, NoteStore, SqliteBackend, StorageBackend, SystemClock};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = config::load_config(&config_path)?;
    if let Some(data) = cli.data.clone() {
        config.data_path = data;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    setup_logging(&config.log_filter);
    tracing::debug!(config = %config_path.display(), backend = ?config.backend, "starting");

    let backend = open_backend(&config)?;
    let mut store = NoteStore::open_with_key(backend, SystemClock, config.storage_key.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&mut store, cli.command, &mut out)?;

    // Mutations persist as they happen; only retry if one of those writes failed
    if store.has_unsaved_changes() {
        store.flush().context("failed to save notes")?;
    }

    Ok(())
}

fn setup_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn open_backend(config: &Config) -> Result<Box<dyn StorageBackend>> {
    let backend: Box<dyn StorageBackend> = match config.backend {
        BackendKind::File => Box::new(FileBackend::new(&config.data_path)),
        BackendKind::Sqlite => {
            let path = config.data_path.join("notekeep.db");
            let backend = SqliteBackend::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(backend)
        }
        BackendKind::Memory => Box::new(MemoryBackend::new()),
    };
    Ok(backend)
}
