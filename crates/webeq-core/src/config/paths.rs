//! Standard locations for WebEQ data

use std::path::PathBuf;

/// Data root: `~/.webeq`
pub fn default_data_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".webeq")
}

/// Config file: `~/.webeq/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_data_path().join("config.yaml")
}

/// Export store root: `~/.webeq/exports`
pub fn default_store_path() -> PathBuf {
    default_data_path().join("exports")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_data_root() {
        let root = default_data_path();
        assert!(root.ends_with(".webeq"));
        assert_eq!(default_config_path(), root.join("config.yaml"));
        assert!(default_store_path().starts_with(&root));
    }
}
