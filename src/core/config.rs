use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk configuration. Everything is optional; a missing file is the
/// same as an empty one.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base URL of the chat service backend.
    pub server: Option<String>,
    /// UI theme name (e.g., "dark", "light").
    pub theme: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "causerie")
            .ok_or("failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.server {
            Some(server) => println!("  server: {server}"),
            None => println!("  server: (unset)"),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loading_a_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from_path(&config_path).expect("load failed");
        assert_eq!(config.server, None);
        assert_eq!(config.theme, None);
    }

    #[test]
    fn server_round_trips_through_toml() {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");

        let config = Config {
            server: Some("http://127.0.0.1:5000".to_string()),
            ..Default::default()
        };
        config.save_to_path(&config_path).expect("save failed");

        let loaded = Config::load_from_path(&config_path).expect("load failed");
        assert_eq!(loaded.server, Some("http://127.0.0.1:5000".to_string()));
    }

    #[test]
    fn unsetting_the_server_persists() {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");

        let config = Config {
            server: Some("http://example.com".to_string()),
            theme: Some("light".to_string()),
        };
        config.save_to_path(&config_path).expect("save failed");

        let mut config = Config::load_from_path(&config_path).expect("load failed");
        config.server = None;
        config.save_to_path(&config_path).expect("save failed");

        let loaded = Config::load_from_path(&config_path).expect("load failed");
        assert_eq!(loaded.server, None);
        assert_eq!(loaded.theme, Some("light".to_string()));
    }
}
