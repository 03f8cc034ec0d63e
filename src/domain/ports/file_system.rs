//! FileSystem port - abstraction over file I/O operations
//!
//! The pipeline reads the source, writes the split files and moves compiler
//! products through this trait, so tests can observe every access.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error on a path
    Io { path: PathBuf, source: std::io::Error },
}

impl FsError {
    /// Attach the path an I/O error happened on.
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FsError::NotFound(path) | FsError::PermissionDenied(path) => path,
            FsError::Io { path, .. } => path,
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
pub trait FileSystem: Send + Sync {
    /// Read file content as bytes
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if a regular file exists
    fn exists(&self, path: &Path) -> bool;

    /// Copy a file, replacing the destination
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Move a file, replacing the destination
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;
}
