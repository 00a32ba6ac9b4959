//! Common git utilities and shared helpers
//!
//! This module contains the user-facing logger shared by the mirror stages.

use crate::config::MirrorJob;
use colored::*;

/// Logger for mirror operations with consistent formatting
///
/// Each message is prefixed with the repository name in cyan/bold so the
/// output of a batch run can be followed job by job.
///
/// ## Example
///
/// ```rust,no_run
/// use repo_mirror::git::Logger;
/// use repo_mirror::config::MirrorJob;
///
/// let logger = Logger::default();
/// let job = MirrorJob::new(
///     "https://github.com/user/repo.git",
///     "https://example.com/mirror/repo.git",
///     None,
/// );
/// logger.info(&job, "Starting mirror");
/// logger.success(&job, "Mirror completed");
/// ```
#[derive(Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn info(&self, job: &MirrorJob, msg: &str) {
        println!("{} | {}", job.repo_name().cyan().bold(), msg);
    }

    pub fn success(&self, job: &MirrorJob, msg: &str) {
        println!("{} | {}", job.repo_name().cyan().bold(), msg.green());
    }

    pub fn warn(&self, job: &MirrorJob, msg: &str) {
        println!("{} | {}", job.repo_name().cyan().bold(), msg.yellow());
    }

    pub fn error(&self, job: &MirrorJob, msg: &str) {
        eprintln!("{} | {}", job.repo_name().cyan().bold(), msg.red());
    }
}
