//! Error taxonomy for mirror jobs
//!
//! Each variant corresponds to one stage of a mirror run. Whether an error
//! aborts the job is decided by the orchestrator, see [`MirrorError::is_fatal`].

use std::path::PathBuf;
use thiserror::Error;

/// Which ref set a push was carrying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushKind {
    Branches,
    Tags,
}

impl std::fmt::Display for PushKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushKind::Branches => write!(f, "branches"),
            PushKind::Tags => write!(f, "tags"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to clone {url}: {reason}")]
    Clone { url: String, reason: String },

    #[error("Failed to list remote branches in {}: {reason}", dir.display())]
    BranchList { dir: PathBuf, reason: String },

    #[error("Failed to create tracking branch '{branch}': {reason}")]
    BranchRecreate { branch: String, reason: String },

    #[error("Failed to reconfigure remote '{remote}': {reason}")]
    RemoteReconfigure { remote: String, reason: String },

    #[error("Failed to push {kind} to {url}: {reason}")]
    Push {
        kind: PushKind,
        url: String,
        reason: String,
    },

    #[error("Failed to prepare workspace {}: {source}", path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove workspace {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MirrorError {
    /// Whether this error ends the job it occurred in
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            MirrorError::BranchRecreate { .. } | MirrorError::Cleanup { .. }
        )
    }
}
