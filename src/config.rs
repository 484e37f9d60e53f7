use crate::error::{PantryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = ".pantry.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PantryConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, relative to the project root unless absolute.
    #[serde(default = "default_database_path")]
    pub path: String,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_database_path() -> String {
    "pantry.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseSettings {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl PantryConfig {
    /// Search upward from `start_path` for `.pantry.toml` and load it.
    ///
    /// Returns the config together with the project root (the directory
    /// holding the config file).
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_file(&config_path)
    }

    pub fn load_file(config_path: &Path) -> Result<(Self, PathBuf)> {
        if !config_path.exists() {
            return Err(PantryError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }
        let content = std::fs::read_to_string(config_path)?;
        let config: PantryConfig = toml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| PantryError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        tracing::debug!(path = %config_path.display(), "Loaded config");
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(PantryError::NotInitialized);
            }
        }
    }

    pub fn database_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.database.path)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PantryConfig::default();
        assert_eq!(config.database.path, "pantry.db");
        assert_eq!(config.database.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.server_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: PantryConfig = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, "pantry.db");
    }

    #[test]
    fn test_save_and_load_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = PantryConfig::default();
        config.database.path = "data/kitchen.db".to_string();
        config.save(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (loaded, root) = PantryConfig::load(&nested).unwrap();
        assert_eq!(root, temp_dir.path());
        assert_eq!(
            loaded.database_path(&root),
            temp_dir.path().join("data/kitchen.db")
        );
    }

    #[test]
    fn test_absolute_database_path_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let absolute = temp_dir.path().join("elsewhere.db");
        let mut config = PantryConfig::default();
        config.database.path = absolute.display().to_string();
        assert_eq!(config.database_path(Path::new("/ignored")), absolute);
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        // Walks all the way to `/`; only passes when no ancestor has a config.
        let result = PantryConfig::find_config_file(temp_dir.path());
        assert!(matches!(result, Err(PantryError::NotInitialized)));
    }
}
