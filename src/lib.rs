//! Repo-mirror - Mirror git repositories, with every branch and tag, to a new remote

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod mirror;
pub mod utils;
pub mod workspace;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::{MirrorConfig, MirrorJob};
pub use error::MirrorError;
pub use mirror::{Mirror, MirrorReport, MirrorStage, mirror_job};
pub use workspace::{Workspace, WorkspacePolicy};

