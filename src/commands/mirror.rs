//! Mirror command implementation

use super::{Command, CommandContext};
use crate::git::Logger;
use crate::mirror::mirror_job;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use std::sync::Arc;

/// Mirror command running every configured job, one after another
pub struct MirrorCommand;

#[async_trait]
impl Command for MirrorCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let jobs = &context.config.jobs;

        if jobs.is_empty() {
            println!("{}", "No mirror jobs configured".yellow());
            return Ok(());
        }

        println!(
            "{}",
            format!("Mirroring {} repositories...", jobs.len()).green()
        );

        let logger = Logger;
        let mut errors = Vec::new();
        let mut successful = 0;
        let mut incomplete = 0;

        // Jobs may share a working directory root, so they never overlap.
        for job in jobs {
            let result = tokio::task::spawn_blocking({
                let git = Arc::clone(&context.git);
                let job = job.clone();
                move || mirror_job(&*git, &job)
            })
            .await?;

            match result {
                Ok(report) => {
                    successful += 1;
                    if report.failed.is_empty() {
                        logger.success(
                            job,
                            &format!("Mirrored {} branches to {}", report.branch_count(), job.to),
                        );
                    } else {
                        incomplete += 1;
                        let names: Vec<&str> =
                            report.failed.iter().map(|f| f.branch.as_str()).collect();
                        logger.warn(
                            job,
                            &format!(
                                "Mirrored to {} but {} of {} branches were not recreated: {}",
                                job.to,
                                report.failed.len(),
                                report.branch_count(),
                                names.join(", ")
                            ),
                        );
                    }
                }
                Err(e) => {
                    logger.error(
                        job,
                        &format!("Mirror from {} to {} failed: {e}", job.from, job.to),
                    );
                    errors.push((job.repo_name(), e));
                    if context.fail_fast {
                        break;
                    }
                }
            }
        }

        let skipped = jobs.len() - successful - errors.len();

        // Report summary
        if errors.is_empty() {
            if incomplete == 0 {
                println!("{}", "Done mirroring repositories".green());
            } else {
                println!(
                    "{}",
                    format!("Done mirroring repositories, {incomplete} with skipped branches")
                        .yellow()
                );
            }
            return Ok(());
        }

        println!(
            "{}",
            format!(
                "Completed with {} successful, {} failed, {} skipped",
                successful,
                errors.len(),
                skipped
            )
            .yellow()
        );

        let (first_repo, first_error) = &errors[0];
        Err(anyhow::anyhow!(
            "{} of {} mirror jobs failed. First error ({}): {}",
            errors.len(),
            jobs.len(),
            first_repo,
            first_error
        ))
    }
}
