mod init;
mod mutate;
mod query;
mod schema;
mod serve;

pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::PantryConfig;
use std::path::PathBuf;

/// Common context passed to command handlers that need a project
pub struct CommandContext {
    pub config: PantryConfig,
    pub root: PathBuf,
}

impl CommandContext {
    pub fn new(config: PantryConfig, root: PathBuf) -> Self {
        Self { config, root }
    }

    /// Apply a `--database` override on top of the loaded config.
    pub fn with_database(mut self, database: Option<String>) -> Self {
        if let Some(path) = database {
            self.config.database.path = path;
        }
        self
    }
}

fn parse_variables(variables: Option<String>) -> anyhow::Result<async_graphql::Variables> {
    Ok(match variables {
        Some(v) => serde_json::from_str(&v)?,
        None => async_graphql::Variables::default(),
    })
}
