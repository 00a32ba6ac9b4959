//! Base types and traits for the command pattern

use crate::config::MirrorConfig;
use crate::git::GitRunner;
use anyhow::Result;
use std::sync::Arc;

/// Context passed to all commands containing shared configuration and options
#[derive(Clone)]
pub struct CommandContext {
    /// The loaded configuration
    pub config: MirrorConfig,
    /// Runner every git invocation goes through
    pub git: Arc<dyn GitRunner>,
    /// Stop a batch at the first failed job instead of attempting the rest
    pub fail_fast: bool,
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
