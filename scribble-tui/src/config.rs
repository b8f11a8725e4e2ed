use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Server configuration stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Configuration manager for the .scribble directory
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create .scribble directory")?;
        }

        Ok(Self { config_dir })
    }

    #[cfg(test)]
    fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the .scribble configuration directory path
    fn get_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home_dir.join(".scribble"))
    }

    fn get_server_config_file(&self) -> PathBuf {
        self.config_dir.join("server_config.json")
    }

    /// Save server configuration
    pub fn save_server_config(&self, config: &ServerConfig) -> Result<()> {
        let config_file = self.get_server_config_file();
        let json = serde_json::to_string_pretty(config)
            .context("Failed to serialize server config")?;

        fs::write(&config_file, json).context("Failed to write server config file")?;

        Ok(())
    }

    /// Load server configuration
    pub fn load_server_config(&self) -> Result<Option<ServerConfig>> {
        let config_file = self.get_server_config_file();

        if !config_file.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&config_file).context("Failed to read server config file")?;

        let config: ServerConfig =
            serde_json::from_str(&json).context("Failed to parse server config")?;

        Ok(Some(config))
    }

    /// Resolve the server URL: explicit argument wins, then the stored
    /// config, then the default. An explicit choice is persisted for next
    /// time.
    pub fn determine_server_url(&self, cli_server: Option<String>) -> Result<String> {
        if let Some(url) = cli_server {
            let config = ServerConfig {
                server_url: url.clone(),
                last_updated: chrono::Utc::now(),
            };
            if let Err(e) = self.save_server_config(&config) {
                log::warn!("Failed to persist server config: {}", e);
            }
            return Ok(url);
        }

        if let Some(config) = self.load_server_config()? {
            return Ok(config.server_url);
        }

        Ok(ServerConfig::default().server_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_server_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());

        assert!(manager.load_server_config().unwrap().is_none());

        let config = ServerConfig {
            server_url: "http://10.0.0.2:8000".to_string(),
            last_updated: chrono::Utc::now(),
        };
        manager.save_server_config(&config).unwrap();

        let loaded = manager.load_server_config().unwrap().unwrap();
        assert_eq!(loaded.server_url, "http://10.0.0.2:8000");
    }

    #[test]
    fn test_determine_server_url_prefers_cli() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());

        let url = manager
            .determine_server_url(Some("http://cli:8000".to_string()))
            .unwrap();
        assert_eq!(url, "http://cli:8000");

        // The CLI choice sticks for the next run without an argument.
        let url = manager.determine_server_url(None).unwrap();
        assert_eq!(url, "http://cli:8000");
    }

    #[test]
    fn test_determine_server_url_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());

        let url = manager.determine_server_url(None).unwrap();
        assert_eq!(url, "http://127.0.0.1:8000");
    }
}
