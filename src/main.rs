use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pantry::cli::handlers::{
    CommandContext, handle_init, handle_mutate, handle_query, handle_schema, handle_serve,
};
use pantry::cli::{Cli, Commands};
use pantry::config::PantryConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    pantry::logging::init(cli.verbose, cli.log_file.clone());

    match cli.command {
        Commands::Init => handle_init(cli.config, cli.database),
        Commands::Schema { output } => handle_schema(output),
        Commands::Query { query, variables } => {
            let ctx = load_context(cli.config, cli.database)?;
            handle_query(ctx, query, variables)
        }
        Commands::Mutate {
            mutation,
            variables,
        } => {
            let ctx = load_context(cli.config, cli.database)?;
            handle_mutate(ctx, mutation, variables)
        }
        Commands::Serve { host, port } => {
            let ctx = load_context(cli.config, cli.database)?;
            handle_serve(ctx, host, port)
        }
    }
}

fn load_context(config: Option<PathBuf>, database: Option<String>) -> Result<CommandContext> {
    let (config, root) = match config {
        Some(path) => PantryConfig::load_file(&path),
        None => PantryConfig::load(&std::env::current_dir()?),
    }
    .context("Failed to load pantry configuration")?;
    Ok(CommandContext::new(config, root).with_database(database))
}
