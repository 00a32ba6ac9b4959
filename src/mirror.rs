//! Mirror orchestration
//!
//! A mirror run is a fixed sequence of git calls against one working copy:
//!
//! 1. clone the source into the workspace
//! 2. list its remote branches
//! 3. create a local tracking branch for each one, except the branch clone
//!    already checked out
//! 4. rename `origin` to `old-origin` and add the destination as `origin`
//! 5. push every branch, then every tag, to the destination
//!
//! Clone, listing, remote changes and pushes end the job on failure. A branch
//! that cannot be recreated is recorded in the [`MirrorReport`] and skipped.
//! A push with no refs to carry, as for an empty source, is skipped.

use crate::config::MirrorJob;
use crate::constants::git::{OLD_ORIGIN, ORIGIN};
use crate::error::{MirrorError, PushKind};
use crate::git::{self, GitRunner, Logger};
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Progress of one mirror job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorStage {
    Created,
    Cloning,
    Enumerating,
    Recreating,
    Repointing,
    Pushing,
    Done,
    Failed,
}

impl std::fmt::Display for MirrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MirrorStage::Created => "created",
            MirrorStage::Cloning => "cloning",
            MirrorStage::Enumerating => "enumerating",
            MirrorStage::Recreating => "recreating",
            MirrorStage::Repointing => "repointing",
            MirrorStage::Pushing => "pushing",
            MirrorStage::Done => "done",
            MirrorStage::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// A branch that could not be recreated locally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchFailure {
    pub branch: String,
    pub message: String,
}

/// Outcome of a job that reached [`MirrorStage::Done`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorReport {
    pub repo_name: String,
    pub working_copy: PathBuf,
    /// Branch checked out by clone, already tracking its upstream
    pub checked_out: Option<String>,
    /// Branches recreated locally, in listing order
    pub created: Vec<String>,
    pub failed: Vec<BranchFailure>,
}

impl MirrorReport {
    pub fn branch_count(&self) -> usize {
        usize::from(self.checked_out.is_some()) + self.created.len() + self.failed.len()
    }
}

/// Runs one mirror job against a [`GitRunner`]
pub struct Mirror<'a, R: GitRunner + ?Sized> {
    git: &'a R,
    logger: Logger,
    stage: MirrorStage,
    failed_at: Option<MirrorStage>,
}

impl<'a, R: GitRunner + ?Sized> Mirror<'a, R> {
    pub fn new(git: &'a R) -> Self {
        Self {
            git,
            logger: Logger,
            stage: MirrorStage::Created,
            failed_at: None,
        }
    }

    pub fn stage(&self) -> MirrorStage {
        self.stage
    }

    /// Stage the job was in when it failed
    pub fn failed_at(&self) -> Option<MirrorStage> {
        self.failed_at
    }

    /// Mirror `job`, cloning into `root`
    pub fn run(&mut self, job: &MirrorJob, root: &Path) -> Result<MirrorReport, MirrorError> {
        match self.execute(job, root) {
            Ok(report) => {
                self.enter(MirrorStage::Done);
                Ok(report)
            }
            Err(error) => {
                self.failed_at = Some(self.stage);
                self.enter(MirrorStage::Failed);
                Err(error)
            }
        }
    }

    fn enter(&mut self, stage: MirrorStage) {
        debug!(from = %self.stage, to = %stage, "Mirror stage transition");
        self.stage = stage;
    }

    fn execute(&mut self, job: &MirrorJob, root: &Path) -> Result<MirrorReport, MirrorError> {
        let repo_dir = job.target_dir(root);

        self.enter(MirrorStage::Cloning);
        self.logger
            .info(job, &format!("Cloning repository from {}", job.from));
        git::clone_repository(self.git, &job.from, root, &repo_dir)?;
        self.logger.success(job, "Repository cloned");

        self.enter(MirrorStage::Enumerating);
        let branches = git::list_remote_branches(self.git, &repo_dir)?;
        if branches.is_empty() {
            self.logger.warn(job, "Found 0 remote branches");
        } else {
            self.logger.info(
                job,
                &format!(
                    "Found {} remote branches: {}",
                    branches.len(),
                    branches.join(", ")
                ),
            );
        }

        self.enter(MirrorStage::Recreating);
        let head = git::current_branch(self.git, &repo_dir);
        let mut checked_out = None;
        let mut created = Vec::new();
        let mut failed = Vec::new();
        for branch in branches {
            if head.as_deref() == Some(branch.as_str()) {
                self.logger
                    .info(job, &format!("Branch {branch} already checked out and tracked"));
                checked_out = Some(branch);
                continue;
            }
            match git::create_tracking_branch(self.git, &repo_dir, &branch) {
                Ok(()) => {
                    self.logger
                        .success(job, &format!("Branch {branch} created and tracked"));
                    created.push(branch);
                }
                Err(error) => {
                    self.logger.warn(job, &error.to_string());
                    failed.push(BranchFailure {
                        branch,
                        message: error.to_string(),
                    });
                }
            }
        }

        self.enter(MirrorStage::Repointing);
        git::rename_remote(self.git, &repo_dir, ORIGIN, OLD_ORIGIN)?;
        git::add_remote(self.git, &repo_dir, ORIGIN, &job.to)?;

        self.enter(MirrorStage::Pushing);
        self.logger
            .info(job, &format!("Pushing branches and tags to {}", job.to));
        for kind in [PushKind::Branches, PushKind::Tags] {
            if git::has_refs_to_push(self.git, &repo_dir, kind, &job.to)? {
                git::push_to_origin(self.git, &repo_dir, kind, &job.to)?;
                self.logger.success(job, &format!("Pushed {kind}"));
            } else {
                self.logger.warn(job, &format!("No {kind} to push, skipped"));
            }
        }

        Ok(MirrorReport {
            repo_name: job.repo_name(),
            working_copy: repo_dir,
            checked_out,
            created,
            failed,
        })
    }
}

/// Run `job` end to end inside the workspace its configuration asks for
///
/// Ephemeral workspaces are removed on success and on failure. A cleanup
/// error is logged and never changes the job's result.
pub fn mirror_job<R: GitRunner + ?Sized>(
    git: &R,
    job: &MirrorJob,
) -> Result<MirrorReport, MirrorError> {
    let logger = Logger;
    let workspace = Workspace::acquire(&job.workspace_policy())?;

    let mut mirror = Mirror::new(git);
    let result = mirror.run(job, workspace.path());
    if let Some(stage) = mirror.failed_at() {
        debug!(%stage, source = %job.from, destination = %job.to, "Mirror job failed");
    }

    if let Err(error) = workspace.release() {
        logger.warn(job, &error.to_string());
    }

    result
}
