use std::path::PathBuf;

use thiserror::Error;

/// Library error type for banner setup.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured image directory does not exist or is not a directory.
    #[error("invalid image directory: {}", .0.display())]
    BadDir(PathBuf),

    /// The scan completed but found no images.
    #[error("no images found under {}", .0.display())]
    EmptyScan(PathBuf),

    /// Directory traversal error.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
