//! Clone, remote reconfiguration and push operations
//!
//! These wrap the git calls on either side of branch recreation: cloning the
//! source, swapping `origin` over to the destination, and pushing every branch
//! and tag there.

use super::runner::{GitRunner, run_checked};
use crate::constants::git::ORIGIN;
use crate::error::{MirrorError, PushKind};
use std::path::Path;

/// Clone `url` into `target_dir`, running git from `root`
pub fn clone_repository<R: GitRunner + ?Sized>(
    git: &R,
    url: &str,
    root: &Path,
    target_dir: &Path,
) -> Result<(), MirrorError> {
    if target_dir.exists() {
        return Err(MirrorError::Clone {
            url: url.to_string(),
            reason: format!("target directory {} already exists", target_dir.display()),
        });
    }

    let target = target_dir.to_string_lossy();
    run_checked(git, &["clone", url, &target], root).map_err(|reason| MirrorError::Clone {
        url: url.to_string(),
        reason,
    })?;
    Ok(())
}

/// Rename remote `from` to `to`
pub fn rename_remote<R: GitRunner + ?Sized>(
    git: &R,
    repo_dir: &Path,
    from: &str,
    to: &str,
) -> Result<(), MirrorError> {
    run_checked(git, &["remote", "rename", from, to], repo_dir).map_err(|reason| {
        MirrorError::RemoteReconfigure {
            remote: from.to_string(),
            reason,
        }
    })?;
    Ok(())
}

/// Add a remote called `name` pointing at `url`
pub fn add_remote<R: GitRunner + ?Sized>(
    git: &R,
    repo_dir: &Path,
    name: &str,
    url: &str,
) -> Result<(), MirrorError> {
    run_checked(git, &["remote", "add", name, url], repo_dir).map_err(|reason| {
        MirrorError::RemoteReconfigure {
            remote: name.to_string(),
            reason,
        }
    })?;
    Ok(())
}

/// Push all local branches or all tags to `origin`, setting upstream tracking
///
/// `url` is only used to label the error.
pub fn push_to_origin<R: GitRunner + ?Sized>(
    git: &R,
    repo_dir: &Path,
    kind: PushKind,
    url: &str,
) -> Result<(), MirrorError> {
    let refs = match kind {
        PushKind::Branches => "--all",
        PushKind::Tags => "--tags",
    };

    run_checked(git, &["push", "--set-upstream", ORIGIN, refs], repo_dir).map_err(|reason| {
        MirrorError::Push {
            kind,
            url: url.to_string(),
            reason,
        }
    })?;
    Ok(())
}

/// Whether the working copy holds any ref a push of `kind` would carry
///
/// A clone of an empty repository has neither branches nor tags, and git
/// refuses `push --all` outright in that case.
pub fn has_refs_to_push<R: GitRunner + ?Sized>(
    git: &R,
    repo_dir: &Path,
    kind: PushKind,
    url: &str,
) -> Result<bool, MirrorError> {
    let namespace = match kind {
        PushKind::Branches => "refs/heads",
        PushKind::Tags => "refs/tags",
    };

    let output = run_checked(
        git,
        &["for-each-ref", "--count=1", "--format=%(refname)", namespace],
        repo_dir,
    )
    .map_err(|reason| MirrorError::Push {
        kind,
        url: url.to_string(),
        reason,
    })?;
    Ok(!output.stdout_lossy().trim().is_empty())
}

/// Read the URL configured for `remote`
pub fn get_remote_url<R: GitRunner + ?Sized>(
    git: &R,
    repo_dir: &Path,
    remote: &str,
) -> Result<String, MirrorError> {
    let output = run_checked(git, &["remote", "get-url", remote], repo_dir).map_err(|reason| {
        MirrorError::RemoteReconfigure {
            remote: remote.to_string(),
            reason,
        }
    })?;
    Ok(output.stdout_lossy().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::runner::GitOutput;
    use std::io;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct Recorder {
        calls: Mutex<Vec<String>>,
        reply: GitOutput,
    }

    impl Recorder {
        fn replying(reply: GitOutput) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    impl GitRunner for Recorder {
        fn run(&self, args: &[&str], _cwd: &Path) -> io::Result<GitOutput> {
            self.calls.lock().unwrap().push(args.join(" "));
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_clone_refuses_existing_target() {
        let temp_dir = TempDir::new().unwrap();
        let git = Recorder::replying(GitOutput::ok(""));

        let err = clone_repository(
            &git,
            "https://example.com/owner/repo.git",
            temp_dir.path(),
            temp_dir.path(),
        )
        .unwrap_err();

        assert!(matches!(err, MirrorError::Clone { .. }));
        assert!(git.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_push_arguments() {
        let git = Recorder::replying(GitOutput::ok(""));
        let dir = Path::new("/work/repo");

        push_to_origin(&git, dir, PushKind::Branches, "dest").unwrap();
        push_to_origin(&git, dir, PushKind::Tags, "dest").unwrap();

        let calls = git.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "push --set-upstream origin --all",
                "push --set-upstream origin --tags"
            ]
        );
    }

    #[test]
    fn test_push_failure_names_destination() {
        let git = Recorder::replying(GitOutput::failed(1, "! [rejected] main -> main"));
        let err = push_to_origin(
            &git,
            Path::new("/work/repo"),
            PushKind::Branches,
            "https://example.com/dest.git",
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("branches"));
        assert!(message.contains("https://example.com/dest.git"));
        assert!(message.contains("rejected"));
    }

    #[test]
    fn test_remote_reconfigure_failure() {
        let git = Recorder::replying(GitOutput::failed(3, "error: No such remote: 'origin'"));
        let err = rename_remote(&git, Path::new("/work/repo"), "origin", "old-origin").unwrap_err();
        assert!(matches!(
            err,
            MirrorError::RemoteReconfigure { ref remote, .. } if remote == "origin"
        ));
    }

    #[test]
    fn test_has_refs_to_push() {
        let dir = Path::new("/work/repo");

        let git = Recorder::replying(GitOutput::ok("refs/heads/main\n"));
        assert!(has_refs_to_push(&git, dir, PushKind::Branches, "dest").unwrap());
        assert_eq!(
            git.calls.lock().unwrap()[0],
            "for-each-ref --count=1 --format=%(refname) refs/heads"
        );

        let git = Recorder::replying(GitOutput::ok(""));
        assert!(!has_refs_to_push(&git, dir, PushKind::Tags, "dest").unwrap());
        assert_eq!(
            git.calls.lock().unwrap()[0],
            "for-each-ref --count=1 --format=%(refname) refs/tags"
        );
    }

    #[test]
    fn test_get_remote_url_trims_output() {
        let git = Recorder::replying(GitOutput::ok("https://example.com/dest.git\n"));
        let url = get_remote_url(&git, Path::new("/work/repo"), "origin").unwrap();
        assert_eq!(url, "https://example.com/dest.git");
    }
}
