//! Command argument validation utilities
//!
//! This module validates command arguments after clap parsing, for the rules
//! clap itself cannot express. URL rules are shared with batch file
//! validation in `utils::validators`.

use crate::utils::validators::validate_remote_url;
use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    /// Two arguments that must differ were given the same value
    Conflict {
        first: String,
        second: String,
        value: String,
    },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
            CommandValidationError::Conflict {
                first,
                second,
                value,
            } => {
                write!(f, "{} and {} cannot both be '{}'", first, second, value)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// Convert validation error to anyhow::Error
pub fn validation_error_to_anyhow(error: CommandValidationError) -> anyhow::Error {
    anyhow!(error.to_string())
}

/// Validate mirror command arguments
///
/// Both URLs must be well-formed git URLs and must differ.
pub fn validate_mirror_args(from: &str, to: &str) -> Result<()> {
    for (argument, value) in [("--from", from), ("--to", to)] {
        if let Err(error) = validate_remote_url(argument, value) {
            return Err(validation_error_to_anyhow(
                CommandValidationError::InvalidValue {
                    argument: argument.to_string(),
                    value: value.to_string(),
                    reason: error.to_string(),
                },
            ));
        }
    }

    if from.trim() == to.trim() {
        return Err(validation_error_to_anyhow(CommandValidationError::Conflict {
            first: "--from".to_string(),
            second: "--to".to_string(),
            value: from.to_string(),
        }));
    }

    Ok(())
}

/// Validate the working directory argument
///
/// Ensures the directory, when provided, is not empty
pub fn validate_working_directory(cwd: &Option<PathBuf>) -> Result<()> {
    if let Some(dir) = cwd
        && dir.as_os_str().to_string_lossy().trim().is_empty()
    {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "--cwd".to_string(),
                value: dir.display().to_string(),
                reason: "working directory cannot be empty or whitespace only".to_string(),
            },
        ));
    }
    Ok(())
}

/// Validate config file path
///
/// Ensures the path is not empty or whitespace only
pub fn validate_config_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "config".to_string(),
                value: path.to_string(),
                reason: "config path cannot be empty or whitespace only".to_string(),
            },
        ));
    }
    Ok(())
}

/// Validate the destination base used by `init`
pub fn validate_destination_base(base: &Option<String>) -> Result<()> {
    if let Some(base) = base
        && let Err(error) = validate_remote_url("--destination-base", base)
    {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "--destination-base".to_string(),
                value: base.clone(),
                reason: error.to_string(),
            },
        ));
    }
    Ok(())
}
