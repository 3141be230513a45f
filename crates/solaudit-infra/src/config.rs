//! Configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.solaudit/` by default)
//! into [`AppConfig`]. The implicit data-dir file is lenient: a missing or
//! malformed file yields defaults. A path given explicitly with `--config`
//! is strict and its failures are returned to the caller.

use std::path::{Path, PathBuf};

use solaudit_types::config::AppConfig;

use crate::filesystem::config_path;

/// Errors from loading an explicitly named config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Load configuration from an explicit path.
pub async fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    toml::from_str::<AppConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
