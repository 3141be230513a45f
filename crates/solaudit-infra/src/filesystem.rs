//! Data directory layout.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SOLAUDIT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `SOLAUDIT_DATA_DIR` environment variable
/// 2. `~/.solaudit`
/// 3. `.solaudit` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".solaudit");
    }

    PathBuf::from(".solaudit")
}

/// `{data_dir}/config.toml`
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let data_dir = PathBuf::from("/home/user/.solaudit");
        assert_eq!(
            config_path(&data_dir),
            PathBuf::from("/home/user/.solaudit/config.toml")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: no other test in this crate reads or writes this variable.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-solaudit");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-solaudit"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
