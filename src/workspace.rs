//! Working directory lifecycle for mirror jobs
//!
//! A persistent workspace is a configured directory that is created if
//! missing and left in place afterwards. An ephemeral workspace is a fresh
//! temporary directory removed once the job ends, whatever its outcome.

use crate::constants::workspace::TEMP_PREFIX;
use crate::error::MirrorError;
use crate::utils::ensure_directory_exists;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// How a job's working directory is provided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspacePolicy {
    Persistent(PathBuf),
    Ephemeral,
}

#[derive(Debug)]
enum Root {
    Persistent(PathBuf),
    Ephemeral(TempDir),
}

/// An acquired working directory
#[derive(Debug)]
pub struct Workspace {
    root: Root,
}

impl Workspace {
    pub fn acquire(policy: &WorkspacePolicy) -> Result<Self, MirrorError> {
        let root = match policy {
            WorkspacePolicy::Persistent(path) => {
                ensure_directory_exists(path).map_err(|source| MirrorError::Workspace {
                    path: path.clone(),
                    source,
                })?;
                Root::Persistent(path.clone())
            }
            WorkspacePolicy::Ephemeral => {
                let dir = tempfile::Builder::new()
                    .prefix(TEMP_PREFIX)
                    .tempdir()
                    .map_err(|source| MirrorError::Workspace {
                        path: std::env::temp_dir(),
                        source,
                    })?;
                Root::Ephemeral(dir)
            }
        };

        let workspace = Self { root };
        debug!(path = %workspace.path().display(), "Workspace acquired");
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        match &self.root {
            Root::Persistent(path) => path,
            Root::Ephemeral(dir) => dir.path(),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self.root, Root::Ephemeral(_))
    }

    /// Give the workspace back, removing it if it was ephemeral
    pub fn release(self) -> Result<(), MirrorError> {
        match self.root {
            Root::Persistent(path) => {
                debug!(path = %path.display(), "Leaving persistent workspace in place");
                Ok(())
            }
            Root::Ephemeral(dir) => {
                let path = dir.path().to_path_buf();
                dir.close()
                    .map_err(|source| MirrorError::Cleanup { path: path.clone(), source })?;
                debug!(path = %path.display(), "Removed temporary workspace");
                Ok(())
            }
        }
    }
}
