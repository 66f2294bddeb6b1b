//! Client configuration loading

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Settings shared by the CLI and TUI front-ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend API.
    pub api_url: String,
    /// Language sent with list requests.
    pub lang: String,
    /// Default page size for list views.
    pub page_size: u64,
    /// Override for where session/preferences files live.
    pub state_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            lang: "ar".to_string(),
            page_size: 10,
            state_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))
    }

    /// Load from the conventional locations or fall back to defaults.
    ///
    /// Order: `MAQRAA_CONFIG`, `./maqraa.toml`, then the platform config
    /// directory. A path that exists but does not parse is an error; a
    /// missing file is not.
    ///
    /// # Errors
    /// Returns an error only for an existing but unreadable/invalid file.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var("MAQRAA_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        let mut paths = vec![PathBuf::from("maqraa.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("maqraa").join("maqraa.toml"));
        }

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.lang, "ar");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn parses_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maqraa.toml");
        std::fs::write(&path, "api_url = \"https://api.example.org\"\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.api_url, "https://api.example.org");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maqraa.toml");
        std::fs::write(&path, "api_url = [").unwrap();
        assert!(ClientConfig::load(&path).is_err());
    }
}
