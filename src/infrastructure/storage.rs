use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::console_config::ConsoleConfig;

const APP_DIR_NAME: &str = "endpoint-console";

/// Resolves (and creates) the directory holding console state such as the
/// token file. Precedence: `data_dir` from config, `$XDG_DATA_HOME`,
/// `$HOME/.local/share`, then the working directory.
pub fn resolve_data_dir(config: &ConsoleConfig) -> std::io::Result<PathBuf> {
    let data_dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_root().join(APP_DIR_NAME),
    };
    ensure_dir(&data_dir)?;
    Ok(data_dir)
}

pub fn token_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("token")
}

fn default_data_root() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|value| !value.is_empty()) {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from(".")
}

pub(crate) fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_data_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let config = ConsoleConfig {
            data_dir: Some(root.path().join("nested").join("state")),
            ..ConsoleConfig::default()
        };

        let dir = resolve_data_dir(&config).unwrap();
        assert!(dir.is_dir());
        assert_eq!(token_file_path(&dir), dir.join("token"));
    }
}
