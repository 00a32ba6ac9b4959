//! Process runner for git invocations
//!
//! Every git call the mirror makes goes through a [`GitRunner`]. The system
//! implementation, [`SystemGit`], spawns the git binary and waits for it to
//! finish; tests substitute a scripted runner.

use crate::constants;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Captured result of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit status, `-1` when the process was killed by a signal
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl GitOutput {
    /// Successful output carrying the given stdout text
    pub fn ok(stdout: &str) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        }
    }

    /// Failed output carrying the given exit code and stderr text
    pub fn failed(exit_code: i32, stderr: &str) -> Self {
        Self {
            exit_code,
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Capability to run git with an argument list inside a directory
///
/// Returns `Err` only when git could not be launched. A non-zero exit is
/// reported through [`GitOutput::exit_code`].
pub trait GitRunner: Send + Sync {
    fn run(&self, args: &[&str], cwd: &Path) -> io::Result<GitOutput>;
}

/// Runs the git binary found on `PATH`, or an explicit program path
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
}

impl SystemGit {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new(constants::git::DEFAULT_PROGRAM)
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str], cwd: &Path) -> io::Result<GitOutput> {
        debug!(
            program = %self.program,
            cwd = %cwd.display(),
            "Executing: git {}",
            args.join(" ")
        );

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .output()?;

        let result = GitOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        };

        debug!(
            exit_code = result.exit_code,
            "git {} finished",
            args.first().copied().unwrap_or_default()
        );
        if !result.stdout.is_empty() {
            debug!("stdout: {}", result.stdout_lossy().trim());
        }
        if !result.stderr.is_empty() {
            debug!("stderr: {}", result.stderr_lossy().trim());
        }

        Ok(result)
    }
}

/// Run git and turn launch failures or non-zero exits into a reason string
///
/// The reason names the git subcommand, its exit status and git's own
/// trimmed stderr so callers can wrap it in the error variant for their stage.
pub fn run_checked<R: GitRunner + ?Sized>(
    git: &R,
    args: &[&str],
    cwd: &Path,
) -> Result<GitOutput, String> {
    let subcommand = args.first().copied().unwrap_or_default();
    let output = git
        .run(args, cwd)
        .map_err(|e| format!("failed to launch git {subcommand}: {e}"))?;

    if output.success() {
        Ok(output)
    } else {
        let stderr = output.stderr_lossy();
        let stderr = stderr.trim();
        if stderr.is_empty() {
            Err(format!("git {subcommand} exited with status {}", output.exit_code))
        } else {
            Err(format!(
                "git {subcommand} exited with status {}: {stderr}",
                output.exit_code
            ))
        }
    }
}
