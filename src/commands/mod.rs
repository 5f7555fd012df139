//! CLI command implementations.

pub mod sources;
pub mod update;
pub mod verify;

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;

/// Resolve the effective configuration from CLI options.
///
/// The built-in sources are used unless a config file is given; an explicit
/// output directory always wins.
pub fn load_config(config_path: Option<&Path>, output_dir: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };

    if let Some(dir) = output_dir {
        config.output_dir = dir.to_path_buf();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config.sources.len(), 6);
        assert_eq!(config.output_dir, PathBuf::from("BlockLists"));
    }

    #[test]
    fn test_load_config_output_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "output_dir: from_file\nsources:\n  - id: one\n    url: https://example.com/one\n",
        )
        .unwrap();

        let config = load_config(Some(path.as_path()), None).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("from_file"));
        assert_eq!(config.source_ids(), vec!["one"]);

        let config = load_config(Some(path.as_path()), Some(Path::new("cli_dir"))).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("cli_dir"));
    }
}
