use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".json";
const DEFAULT_PUZZLE_NAME: &str = "New Puzzle";

/// Authoring configuration, stored as config.json in the store root.
///
/// The library does not read this itself; the host loads it and wires the
/// values into `FileStore::with_file_ext` and `PuzzleApi::create_puzzle`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleConfig {
    /// File extension for stored puzzle documents (e.g., ".json")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Display name given to freshly generated puzzles
    #[serde(default = "default_puzzle_name")]
    pub default_puzzle_name: String,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_puzzle_name() -> String {
    DEFAULT_PUZZLE_NAME.to_string()
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            default_puzzle_name: default_puzzle_name(),
        }
    }
}

impl PuzzleConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: PuzzleConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the file extension (ensures it starts with a dot)
    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PuzzleConfig::default();
        assert_eq!(config.file_ext, ".json");
        assert_eq!(config.default_puzzle_name, "New Puzzle");
    }

    #[test]
    fn test_set_file_ext_with_dot() {
        let mut config = PuzzleConfig::default();
        config.set_file_ext(".puzzle");
        assert_eq!(config.file_ext, ".puzzle");
    }

    #[test]
    fn test_set_file_ext_without_dot() {
        let mut config = PuzzleConfig::default();
        config.set_file_ext("puzzle");
        assert_eq!(config.file_ext, ".puzzle");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = PuzzleConfig::load(temp_dir.path().join("absent")).unwrap();
        assert_eq!(config, PuzzleConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = PuzzleConfig::default();
        config.set_file_ext(".puzzle");
        config.default_puzzle_name = "Untitled Puzzle".to_string();
        config.save(temp_dir.path()).unwrap();

        let loaded = PuzzleConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{ "file_ext": ".pz" }"#,
        )
        .unwrap();

        let loaded = PuzzleConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".pz");
        assert_eq!(loaded.default_puzzle_name, "New Puzzle");
    }
}
