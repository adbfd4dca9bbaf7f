//! Configuration module for mfd
//!
//! Manages which programs are run for searching and inspecting files, the
//! seed clause policy, and user-defined `--type` mnemonics.
//! Configuration is stored in the user's config directory.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::predicate::SeedPolicy;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MfdConfig {
    /// Program that runs the search
    pub mdfind: String,

    /// Program that prints a file's metadata attributes
    pub mdls: String,

    /// Whether the `(true)` seed clause stays once real clauses exist
    pub seed: SeedPolicy,

    /// Print the search command and debug diagnostics by default
    pub debug: bool,

    /// Extra or overriding `--type` mnemonics (extension → kind substring)
    pub kinds: HashMap<String, String>,
}

impl Default for MfdConfig {
    fn default() -> Self {
        Self {
            mdfind: "mdfind".to_string(),
            mdls: "mdls".to_string(),
            seed: SeedPolicy::default(),
            debug: false,
            kinds: HashMap::new(),
        }
    }
}

impl MfdConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("mfd").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(config_path)
    }

    /// Load configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MfdConfig::default();
        assert_eq!(config.mdfind, "mdfind");
        assert_eq!(config.mdls, "mdls");
        assert_eq!(config.seed, SeedPolicy::Always);
        assert!(!config.debug);
        assert!(config.kinds.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = MfdConfig::default();
        config.seed = SeedPolicy::WhenEmpty;
        config.kinds.insert("graffle".to_string(), "OmniGraffle".to_string());
        config.save_to(&path).unwrap();

        let loaded = MfdConfig::load_from(path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "mdls = \"/usr/local/bin/mdls\"\n").unwrap();

        let loaded = MfdConfig::load_from(path).unwrap();
        assert_eq!(loaded.mdls, "/usr/local/bin/mdls");
        assert_eq!(loaded.mdfind, "mdfind");
        assert_eq!(loaded.seed, SeedPolicy::Always);
    }

    #[test]
    fn test_kinds_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "seed = \"when-empty\"\n\n[kinds]\nepub = \"EPUB\"\n").unwrap();

        let loaded = MfdConfig::load_from(path).unwrap();
        assert_eq!(loaded.seed, SeedPolicy::WhenEmpty);
        assert_eq!(loaded.kinds.get("epub").map(String::as_str), Some("EPUB"));
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "seed = \"sometimes\"\n").unwrap();

        assert!(MfdConfig::load_from(path).is_err());
    }
}
