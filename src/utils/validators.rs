//! Configuration validation utilities
//!
//! This module provides centralized validation logic for mirror jobs, whether
//! they come from a batch file or from command-line arguments.

use crate::config::MirrorJob;
use crate::error::MirrorError;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::LazyLock;
use url::Url;

/// URL schemes git can clone from and push to
const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "ssh", "git", "file"];

/// `user@host:path`, the scp-like address form git accepts
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+:[^/\s][^\s]*$")
        .expect("scp-like URL pattern is valid")
});

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A URL field is empty; carries the field name
    EmptyUrl(String),
    /// A URL field is not a well-formed git URL; carries field name and value
    InvalidUrl(String, String),
    /// No repository name can be derived from the source URL
    UnnamedSource(String),
    /// Source and destination are the same URL
    SameSourceAndDestination(String),
    /// The working directory is not an absolute path
    RelativeWorkingDirectory(PathBuf),
    /// Two jobs would clone into the same directory
    DuplicateTarget(PathBuf),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyUrl(field) => {
                write!(f, "'{}' URL cannot be empty", field)
            }
            ValidationError::InvalidUrl(field, url) => {
                write!(f, "'{}' has invalid URL: '{}'", field, url)
            }
            ValidationError::UnnamedSource(url) => {
                write!(f, "Cannot derive a repository name from '{}'", url)
            }
            ValidationError::SameSourceAndDestination(url) => {
                write!(f, "Source and destination are both '{}'", url)
            }
            ValidationError::RelativeWorkingDirectory(path) => {
                write!(f, "Working directory must be absolute: '{}'", path.display())
            }
            ValidationError::DuplicateTarget(path) => {
                write!(f, "Duplicate working copy directory: '{}'", path.display())
            }
        }
    }
}

/// Validates a list of jobs
///
/// Checks each job individually, then rejects jobs that would clone into the
/// same directory, since the second clone would collide with the first.
pub fn validate_jobs(jobs: &[MirrorJob]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for job in jobs {
        if let Err(mut job_errors) = validate_job(job) {
            errors.append(&mut job_errors);
        }
    }

    let mut targets = HashSet::new();
    for job in jobs {
        if let Some(cwd) = &job.cwd {
            let target = job.target_dir(cwd);
            if !targets.insert(target.clone()) {
                errors.push(ValidationError::DuplicateTarget(target));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single job
pub fn validate_job(job: &MirrorJob) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(error) = validate_remote_url("from", &job.from) {
        errors.push(error);
    } else if job.repo_name().is_empty() {
        errors.push(ValidationError::UnnamedSource(job.from.clone()));
    }

    if let Err(error) = validate_remote_url("to", &job.to) {
        errors.push(error);
    }

    if !job.from.is_empty() && job.from.trim() == job.to.trim() {
        errors.push(ValidationError::SameSourceAndDestination(job.from.clone()));
    }

    if let Some(cwd) = &job.cwd
        && !cwd.is_absolute()
    {
        errors.push(ValidationError::RelativeWorkingDirectory(cwd.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates one URL field
pub fn validate_remote_url(field: &str, url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        Err(ValidationError::EmptyUrl(field.to_string()))
    } else if !is_valid_remote_url(url.trim()) {
        Err(ValidationError::InvalidUrl(field.to_string(), url.to_string()))
    } else {
        Ok(())
    }
}

/// Helper function to check if a remote URL is valid
///
/// Accepts scp-like addresses (`git@host:path`) and URLs with a supported
/// scheme. Network URLs need a host; `file://` URLs need a path.
fn is_valid_remote_url(url: &str) -> bool {
    if SCP_LIKE.is_match(url) {
        return true;
    }

    match Url::parse(url) {
        Ok(parsed) if SUPPORTED_SCHEMES.contains(&parsed.scheme()) => {
            if parsed.scheme() == "file" {
                parsed.path().len() > 1
            } else {
                parsed.host_str().is_some_and(|host| !host.is_empty())
            }
        }
        _ => false,
    }
}

/// Converts validation errors into a configuration error
pub fn validation_errors_to_mirror_error(errors: Vec<ValidationError>) -> MirrorError {
    let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    MirrorError::Configuration(format!("Validation errors: {}", error_messages.join("; ")))
}
