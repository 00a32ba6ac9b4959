//! Batch file loading and saving
//!
//! A batch file is a JSON array of `{ "from", "to", "cwd" }` objects. Anything
//! else, including a JSON object wrapping the array, is rejected before any
//! job runs.

use super::MirrorJob;
use crate::error::MirrorError;
use crate::utils::validators;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorConfig {
    pub jobs: Vec<MirrorJob>,
}

impl MirrorConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration holding exactly one job
    pub fn single(job: MirrorJob) -> Self {
        Self { jobs: vec![job] }
    }

    /// Load and validate a batch file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MirrorError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MirrorError::Configuration(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate batch file content
    pub fn from_json(content: &str) -> Result<Self, MirrorError> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| MirrorError::Configuration(format!("Invalid JSON: {e}")))?;

        if !value.is_array() {
            return Err(MirrorError::Configuration(
                "Batch file must contain a JSON array of mirror jobs".to_string(),
            ));
        }

        let config: MirrorConfig = serde_json::from_value(value)
            .map_err(|e| MirrorError::Configuration(format!("Invalid mirror job: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration as a pretty-printed JSON array
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), MirrorError> {
        validators::validate_jobs(&self.jobs).map_err(validators::validation_errors_to_mirror_error)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
