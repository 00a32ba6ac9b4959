//! Init command implementation

use super::{Command, CommandContext};
use crate::config::{MirrorConfig, MirrorJob};
use crate::constants;
use crate::git;
use crate::utils::validators;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use std::path::Path;
use walkdir::WalkDir;

/// Init command for creating a batch file from discovered working copies
///
/// Every git working copy below the current directory becomes one job whose
/// source is its `origin` URL. Generated jobs have no `cwd`, so each runs in
/// a temporary workspace.
pub struct InitCommand {
    pub output: String,
    pub overwrite: bool,
    /// Base URL destinations are derived from, `<base>/<name>.git`
    pub destination_base: Option<String>,
}

impl InitCommand {
    fn destination_for(&self, name: &str) -> String {
        let base = self
            .destination_base
            .as_deref()
            .unwrap_or(constants::config::PLACEHOLDER_DESTINATION_BASE);
        format!("{}/{}.git", base.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        if Path::new(&self.output).exists() && !self.overwrite {
            return Err(anyhow::anyhow!(
                "Output file '{}' already exists. Use --overwrite to replace it.",
                self.output
            ));
        }

        println!("{}", "Discovering Git repositories...".green());

        let mut config = MirrorConfig::new();
        let current_dir = std::env::current_dir()?;

        for entry in WalkDir::new(&current_dir)
            .max_depth(3)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_name() == ".git"
                && entry.file_type().is_dir()
                && let Some(repo_dir) = entry.path().parent()
                && let Ok(url) =
                    git::get_remote_url(&*context.git, repo_dir, constants::git::ORIGIN)
            {
                let mut job = MirrorJob::new(url, String::new(), None);
                job.to = self.destination_for(&job.repo_name());

                match validators::validate_job(&job) {
                    Ok(()) => config.jobs.push(job),
                    Err(errors) => {
                        let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                        println!(
                            "{}",
                            format!(
                                "Skipping {}: {}",
                                repo_dir.display(),
                                reasons.join("; ")
                            )
                            .yellow()
                        );
                    }
                }
            }
        }

        if config.is_empty() {
            println!(
                "{}",
                "No Git repositories found in current directory".yellow()
            );
            return Ok(());
        }

        println!(
            "{}",
            format!("Found {} repositories", config.jobs.len()).green()
        );

        config.save(&self.output)?;

        println!(
            "{}",
            format!("Configuration saved to '{}'", self.output).green()
        );

        Ok(())
    }
}
