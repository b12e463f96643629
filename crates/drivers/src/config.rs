use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_ENV_VAR: &str = "BOARDKIT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "boardkit.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_path: String,
    pub library_dir: String,
    pub export_dir: String,
    pub image_extensions: Vec<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: "catalog.sqlite3".to_string(),
            library_dir: "library".to_string(),
            export_dir: ".".to_string(),
            image_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `explicit`, else `$BOARDKIT_CONFIG`, else `./boardkit.toml`.
    /// Only an explicitly named file has to exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(path) => (PathBuf::from(path), true),
                None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        if !path.exists() {
            if required {
                return Err(format!("config file not found: {}", path.display()));
            }
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|error| format!("failed to read config {}: {error}", path.display()))?;
        Self::from_toml(&contents)
            .map_err(|error| format!("invalid config {}: {error}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
