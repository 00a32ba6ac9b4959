//! Central constants for the repo-mirror application

/// Default values for Git operations
pub mod git {
    /// Program used when no override is configured
    pub const DEFAULT_PROGRAM: &str = "git";

    /// Environment variable overriding the git program
    pub const PROGRAM_ENV: &str = "REPO_MIRROR_GIT";

    /// Remote name created by clone and reused for the destination
    pub const ORIGIN: &str = "origin";

    /// Name the source remote is moved to before the destination is added
    pub const OLD_ORIGIN: &str = "old-origin";

    /// Suffix stripped from the source URL to name the working copy
    pub const REPO_SUFFIX: &str = ".git";

    /// Symbolic-ref arrow marking an alias line in `git branch -r`
    pub const SYMREF_ARROW: &str = "->";

    /// Symbolic ref name excluded from enumeration
    pub const HEAD: &str = "HEAD";
}

/// Default values for configuration
pub mod config {
    /// Default batch file name
    pub const DEFAULT_CONFIG_FILE: &str = "config.json";

    /// Destination base written by `init` when none is given
    pub const PLACEHOLDER_DESTINATION_BASE: &str = "https://git.example.com/mirror";
}

/// Default values for workspaces
pub mod workspace {
    /// Prefix of ephemeral workspace directories
    pub const TEMP_PREFIX: &str = "repo-mirror-";
}
