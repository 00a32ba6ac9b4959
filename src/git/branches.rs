//! Remote branch discovery and local branch recreation
//!
//! - [`parse_remote_branches`]: turn `git branch -r` text into branch names
//! - [`list_remote_branches`]: run the listing and parse it
//! - [`current_branch`]: the branch the clone checked out, if any
//! - [`create_tracking_branch`]: check out a local branch tracking `origin/<name>`

use super::runner::{GitRunner, run_checked};
use crate::constants::git::{HEAD, ORIGIN, SYMREF_ARROW};
use crate::error::MirrorError;
use std::collections::HashSet;
use std::path::Path;

/// Parse the output of `git branch -r` into short branch names
///
/// Alias lines (`origin/HEAD -> origin/main`) and bare `HEAD` refs are
/// skipped. The HEAD check compares the whole name, so a branch such as
/// `feature/HEADers` survives. Listing order is kept.
pub fn parse_remote_branches(raw: &str) -> Vec<String> {
    let prefix = format!("{ORIGIN}/");
    let mut seen = HashSet::new();

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(SYMREF_ARROW))
        .map(|line| line.strip_prefix(&prefix).unwrap_or(line))
        .filter(|name| !name.is_empty() && *name != HEAD)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// List the remote branches of the working copy at `repo_dir`
pub fn list_remote_branches<R: GitRunner + ?Sized>(
    git: &R,
    repo_dir: &Path,
) -> Result<Vec<String>, MirrorError> {
    let output =
        run_checked(git, &["branch", "-r"], repo_dir).map_err(|reason| MirrorError::BranchList {
            dir: repo_dir.to_path_buf(),
            reason,
        })?;

    Ok(parse_remote_branches(&output.stdout_lossy()))
}

/// Name of the branch checked out in `repo_dir`
///
/// `None` for a detached or unborn HEAD, or when git cannot tell. Clone
/// already created this branch with `origin/<name>` as its upstream.
pub fn current_branch<R: GitRunner + ?Sized>(git: &R, repo_dir: &Path) -> Option<String> {
    let output = run_checked(git, &["rev-parse", "--abbrev-ref", HEAD], repo_dir).ok()?;
    let name = output.stdout_lossy().trim().to_string();
    (!name.is_empty() && name != HEAD).then_some(name)
}

/// Create a local branch tracking `origin/<branch>` and switch to it
pub fn create_tracking_branch<R: GitRunner + ?Sized>(
    git: &R,
    repo_dir: &Path,
    branch: &str,
) -> Result<(), MirrorError> {
    let upstream = format!("{ORIGIN}/{branch}");
    run_checked(git, &["checkout", "-b", branch, &upstream], repo_dir).map_err(|reason| {
        MirrorError::BranchRecreate {
            branch: branch.to_string(),
            reason,
        }
    })?;
    Ok(())
}
