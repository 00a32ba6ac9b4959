//! Configuration management module

pub mod job;
pub mod loader;

pub use job::MirrorJob;
pub use loader::MirrorConfig;
