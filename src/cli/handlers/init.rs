use crate::config::{CONFIG_FILE_NAME, PantryConfig};
use crate::error::PantryError;
use crate::storage::PantryRepository;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Write a config file and create the database next to it.
///
/// `config_path` defaults to `.pantry.toml` in the current directory; the
/// directory holding the config becomes the project root.
pub fn handle_init(config_path: Option<PathBuf>, database: Option<String>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = match config_path {
        Some(path) => cwd.join(path),
        None => cwd.join(CONFIG_FILE_NAME),
    };

    if config_path.exists() {
        return Err(PantryError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let root = config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| cwd.clone());
    std::fs::create_dir_all(&root)?;

    let mut config = PantryConfig::default();
    if let Some(path) = database {
        config.database.path = path;
    }

    // Creates the database file and its tables
    PantryRepository::new(&config, &root)?;

    config.save(&config_path)?;

    println!(
        "{} pantry project in {}",
        "Initialized".green(),
        root.display()
    );
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", config.database_path(&root).display());

    Ok(())
}
