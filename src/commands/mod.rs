//! Command implementations for the repo-mirror CLI

pub mod base;
pub mod init;
pub mod mirror;
pub mod validators;

pub use base::{Command, CommandContext};
pub use init::InitCommand;
pub use mirror::MirrorCommand;
