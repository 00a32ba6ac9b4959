//! Utility modules for common functionality

pub mod filesystem;
pub mod validators;

// Re-export commonly used functions
pub use filesystem::ensure_directory_exists;
pub use validators::{validate_jobs, validate_remote_url};
