use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::types::{AppConfig, ConfigError};
use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    load_from(&path)
}

/// Load configuration from a specific file; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::info!("No config at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppConfig>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(AppConfig::normalized)
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(parent, path, data.as_bytes())
}

/// Write through a temporary sibling so a crash never leaves a partial file.
fn atomic_write(dir: &Path, path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let map_write = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(map_write)?;
    temp.write_all(data).map_err(map_write)?;
    temp.flush().map_err(map_write)?;
    temp.persist(path).map_err(|err| map_write(err.error))?;
    Ok(())
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
