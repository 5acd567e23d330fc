use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::types::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "agent-batch.toml";

/// Loads the config from `path_override`, or from [`DEFAULT_CONFIG_FILE`] in
/// the working directory. Only the default file may be missing.
pub fn load_config(path_override: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    match path_override {
        Some(path) => read_config(&path)?.ok_or(ConfigError::NotFound(path)),
        None => Ok(read_config(Path::new(DEFAULT_CONFIG_FILE))?.unwrap_or_default()),
    }
}

fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(toml::from_str(&contents)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::Io(err)),
    }
}
