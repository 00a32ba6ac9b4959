//! Common test support utilities and fixtures
//!
//! Real git repositories for end-to-end runs, a scripted runner for the
//! command layer, and a helper to run the built binary.

#![allow(dead_code)]

use repo_mirror::git::{GitOutput, GitRunner};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

/// Result of running the CLI binary
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run the repo-mirror binary with given arguments
pub fn run_cli(args: &[&str], cwd: &Path) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_repo-mirror"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("REPO_MIRROR_GIT")
        .output()
        .expect("Failed to execute repo-mirror");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run git in `dir` and return stdout, panicking on failure
pub fn git_ok(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("Failed to execute git");

    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// `file://` URL for a local repository path
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Create a bare source repository with branches `main` and `develop`
/// and tag `v1.0`, returning its path
pub fn create_source_repo(root: &Path, name: &str) -> PathBuf {
    let seed = root.join(format!("{name}-seed"));
    fs::create_dir_all(&seed).unwrap();

    git_ok(&seed, &["init"]);
    git_ok(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git_ok(&seed, &["config", "user.name", "Test User"]);
    git_ok(&seed, &["config", "user.email", "test@example.com"]);
    git_ok(&seed, &["config", "commit.gpgsign", "false"]);
    git_ok(&seed, &["config", "tag.gpgsign", "false"]);

    fs::write(seed.join("README.md"), "# Test Repository").unwrap();
    git_ok(&seed, &["add", "."]);
    git_ok(&seed, &["commit", "-m", "Initial commit"]);
    git_ok(&seed, &["tag", "v1.0"]);

    git_ok(&seed, &["checkout", "-b", "develop"]);
    fs::write(seed.join("CHANGES.md"), "work in progress").unwrap();
    git_ok(&seed, &["add", "."]);
    git_ok(&seed, &["commit", "-m", "Develop commit"]);
    git_ok(&seed, &["checkout", "main"]);

    let bare = root.join(format!("{name}.git"));
    git_ok(
        root,
        &[
            "clone",
            "--bare",
            seed.to_str().unwrap(),
            bare.to_str().unwrap(),
        ],
    );
    bare
}

/// Create an empty bare repository, returning its path
pub fn create_bare_repo(root: &Path, name: &str) -> PathBuf {
    let bare = root.join(format!("{name}.git"));
    git_ok(root, &["init", "--bare", bare.to_str().unwrap()]);
    bare
}

/// Every ref under `refs/heads` and `refs/tags` of a repository
pub fn list_refs(repo: &Path) -> Vec<String> {
    git_ok(
        repo,
        &[
            "for-each-ref",
            "--format=%(refname)",
            "refs/heads",
            "refs/tags",
        ],
    )
    .lines()
    .map(str::to_string)
    .collect()
}

/// Runner that records every call and fails those starting with a prefix
///
/// Every ref namespace it is asked about holds one ref, so pushes always run.
pub struct ScriptedGit {
    calls: Mutex<Vec<String>>,
    listing: String,
    failing: Vec<String>,
}

impl ScriptedGit {
    pub fn new(listing: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            listing: listing.to_string(),
            failing: Vec::new(),
        }
    }

    pub fn failing(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

impl GitRunner for ScriptedGit {
    fn run(&self, args: &[&str], _cwd: &Path) -> io::Result<GitOutput> {
        let line = args.join(" ");
        self.calls.lock().unwrap().push(line.clone());

        if self.failing.iter().any(|prefix| line.starts_with(prefix)) {
            return Ok(GitOutput::failed(128, "fatal: scripted failure"));
        }
        if line == "branch -r" {
            return Ok(GitOutput::ok(&self.listing));
        }
        if line.starts_with("for-each-ref") {
            let namespace = args.last().copied().unwrap_or_default();
            return Ok(GitOutput::ok(&format!("{namespace}/scripted\n")));
        }
        Ok(GitOutput::ok(""))
    }
}
