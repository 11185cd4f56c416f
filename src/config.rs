//! Configuration System
//!
//! File-driven configuration for the merge run: where to scan, which
//! container filename marks a run, and where the merged output goes.
//! Loaded from an optional `genmerge.toml` in the workspace; every field
//! has a default so a bare workspace needs no configuration at all.

use crate::error::MergeError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "genmerge.toml";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Container filename expected in each run sub-directory
    #[serde(default = "default_input_filename")]
    pub input_filename: String,

    /// Filename of the merged output container, created in the workspace
    #[serde(default = "default_output_filename")]
    pub output_filename: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_input_filename() -> String {
    "run.gmc".to_string()
}

fn default_output_filename() -> String {
    "merged.gmc".to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            input_filename: default_input_filename(),
            output_filename: default_output_filename(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MergeConfig {
    /// Validate filename fields: non-empty, no path separators.
    pub fn validate(&self) -> Result<(), MergeError> {
        for (field, value) in [
            ("input_filename", &self.input_filename),
            ("output_filename", &self.output_filename),
        ] {
            if value.is_empty() {
                return Err(MergeError::Config(format!("{} must not be empty", field)));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(MergeError::Config(format!(
                    "{} must be a bare filename, got '{}'",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// Loads configuration from the workspace or an explicit path.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `genmerge.toml` from the workspace root, falling back to
    /// defaults when the file does not exist.
    pub fn load(workspace: &Path) -> Result<MergeConfig, MergeError> {
        let path = workspace.join(CONFIG_FILENAME);
        if !path.is_file() {
            return Ok(MergeConfig::default());
        }
        Self::load_from_file(&path)
    }

    /// Load configuration from an explicit file path.
    pub fn load_from_file(path: &Path) -> Result<MergeConfig, MergeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MergeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: MergeConfig = toml::from_str(&contents).map_err(|e| {
            MergeError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
