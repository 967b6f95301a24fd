//! Configuration file handling for Rage projects.

use rage_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for by [`Config::find_from`].
pub const CONFIG_FILE_NAME: &str = "rage.toml";

/// Represents the rage.toml configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub package: Package,
    #[serde(default)]
    pub compiler: CompilerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

/// The `[compiler]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompilerSettings {
    /// Identifier of the generated IR module
    #[serde(default = "default_module_name")]
    pub module_name: String,
    /// Run the IR verifier on every generated function
    #[serde(default = "default_verify")]
    pub verify: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
            verify: default_verify(),
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_module_name() -> String {
    "Rage Language".to_string()
}

const fn default_verify() -> bool {
    true
}

impl Config {
    /// Creates a new default configuration with the given project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            package: Package {
                name: name.into(),
                version: default_version(),
            },
            compiler: CompilerSettings::default(),
        }
    }

    /// Loads configuration from a rage.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Saves configuration to a rage.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {e}")))?;

        fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write {}: {e}", path.display())))
    }

    /// Searches `start` and its ancestors for a rage.toml file.
    ///
    /// Returns the configuration and the directory containing it, or `None`
    /// when no directory up to the root has one.
    ///
    /// # Errors
    /// Returns an error if a rage.toml is found but cannot be loaded.
    pub fn find_from(start: impl AsRef<Path>) -> Result<Option<(Self, PathBuf)>> {
        let mut current_dir = start.as_ref().to_path_buf();

        loop {
            let config_path = current_dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                let config = Self::load(&config_path)?;
                tracing::debug!(path = %config_path.display(), "loaded configuration");
                return Ok(Some((config, current_dir)));
            }

            if !current_dir.pop() {
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_table_is_optional() {
        let config: Config = toml::from_str("[package]\nname = \"demo\"\n").unwrap();
        assert_eq!(config.package.version, "0.1.0");
        assert_eq!(config.compiler, CompilerSettings::default());
        assert_eq!(config.compiler.module_name, "Rage Language");
        assert!(config.compiler.verify);
    }

    #[test]
    fn test_kebab_case_keys() {
        let source = "[package]\nname = \"demo\"\n[compiler]\nmodule-name = \"Demo\"\nverify = false\n";
        let config: Config = toml::from_str(source).unwrap();
        assert_eq!(config.compiler.module_name, "Demo");
        assert!(!config.compiler.verify);
    }
}
