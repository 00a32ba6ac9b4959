//! A single mirror job: where to clone from, where to push to, where to work

use crate::constants::git::REPO_SUFFIX;
use crate::workspace::WorkspacePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorJob {
    /// Source repository URL
    pub from: String,
    /// Destination repository URL
    pub to: String,
    /// Absolute directory the working copy is cloned into; a temporary
    /// directory is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl MirrorJob {
    pub fn new(from: impl Into<String>, to: impl Into<String>, cwd: Option<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cwd,
        }
    }

    /// Name of the source repository, used for the working copy directory
    ///
    /// This is the last path segment of the source URL with one `.git`
    /// suffix removed, so `git@host:team/tool.git` gives `tool`.
    pub fn repo_name(&self) -> String {
        let trimmed = self.from.trim().trim_end_matches('/');
        let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
        last.strip_suffix(REPO_SUFFIX).unwrap_or(last).to_string()
    }

    /// Directory the source is cloned into under `root`
    pub fn target_dir(&self, root: &Path) -> PathBuf {
        root.join(self.repo_name())
    }

    pub fn workspace_policy(&self) -> WorkspacePolicy {
        match &self.cwd {
            Some(dir) => WorkspacePolicy::Persistent(dir.clone()),
            None => WorkspacePolicy::Ephemeral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(from: &str) -> MirrorJob {
        MirrorJob::new(from, "https://example.com/dest.git", None)
    }

    #[test]
    fn test_repo_name_https() {
        assert_eq!(job("https://github.com/owner/tool.git").repo_name(), "tool");
        assert_eq!(job("https://github.com/owner/tool").repo_name(), "tool");
        assert_eq!(job("https://github.com/owner/tool.git/").repo_name(), "tool");
    }

    #[test]
    fn test_repo_name_scp_like() {
        assert_eq!(job("git@github.com:tool.git").repo_name(), "tool");
        assert_eq!(job("git@github.com:owner/tool.git").repo_name(), "tool");
    }

    #[test]
    fn test_repo_name_strips_one_suffix() {
        assert_eq!(job("file:///srv/git/odd.git.git").repo_name(), "odd.git");
    }

    #[test]
    fn test_target_dir() {
        let job = MirrorJob::new(
            "https://github.com/owner/tool.git",
            "https://example.com/tool.git",
            Some(PathBuf::from("/srv/mirrors")),
        );
        assert_eq!(
            job.target_dir(Path::new("/srv/mirrors")),
            PathBuf::from("/srv/mirrors/tool")
        );
        assert_eq!(
            job.workspace_policy(),
            WorkspacePolicy::Persistent(PathBuf::from("/srv/mirrors"))
        );
    }

    #[test]
    fn test_missing_cwd_is_ephemeral() {
        let job: MirrorJob =
            serde_json::from_str(r#"{"from": "https://a.com/x.git", "to": "https://b.com/x.git"}"#)
                .unwrap();
        assert_eq!(job.cwd, None);
        assert_eq!(job.workspace_policy(), WorkspacePolicy::Ephemeral);
    }
}
