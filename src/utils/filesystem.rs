//! File system utility functions

use std::io;
use std::path::Path;

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}
