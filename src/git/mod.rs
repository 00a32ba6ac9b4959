//! Git operations using system git commands
//!
//! ## Sub-modules
//!
//! - [`runner`]: the [`GitRunner`] capability and its [`SystemGit`] implementation
//! - [`branches`]: remote branch enumeration and tracking-branch recreation
//! - [`remote`]: clone, remote rename/add, and push
//! - [`common`]: the shared [`Logger`]

pub mod branches;
pub mod common;
pub mod remote;
pub mod runner;

pub use branches::{
    create_tracking_branch, current_branch, list_remote_branches, parse_remote_branches,
};
pub use common::Logger;
pub use remote::{
    add_remote, clone_repository, get_remote_url, has_refs_to_push, push_to_origin, rename_remote,
};
pub use runner::{GitOutput, GitRunner, SystemGit};
