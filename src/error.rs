//! Error types for texfast
//!
//! Uses `thiserror` for library errors. Every error belongs to one
//! [`ErrorKind`]; whether it ends the process is decided by the caller from
//! [`TexfastError::fatal_before_watch`] and the current phase, never by the
//! component that raised it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for texfast operations
pub type TexfastResult<T> = Result<T, TexfastError>;

/// Classification of failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Split,
    Compile,
    Filesystem,
}

/// Why a source could not be cut into preamble and body
#[derive(Error, Debug)]
pub enum SplitError {
    /// The split pattern does not occur in the source
    #[error("no split marker found")]
    NoMarkerFound,

    /// More than one match with the `unique` policy
    #[error("split marker found {count} times, expected exactly one")]
    AmbiguousMarker { count: usize },

    /// Still empty after a second read, or not readable at all
    #[error("{} is empty or unreadable", path.display())]
    EmptyOrUnreadable { path: PathBuf },
}

/// File system operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    WriteSplit,
    CopySource,
    CreateOutputDir,
    Relocate,
    RewriteSynctex,
    Cleanup,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FsOp::WriteSplit => "writing split file",
            FsOp::CopySource => "copying source",
            FsOp::CreateOutputDir => "creating output folder",
            FsOp::Relocate => "moving output",
            FsOp::RewriteSynctex => "rewriting synctex",
            FsOp::Cleanup => "removing file",
        };
        f.write_str(s)
    }
}

/// Main error type for texfast operations
#[derive(Error, Debug)]
pub enum TexfastError {
    /// Invalid flags, values or missing input
    #[error("{message}")]
    Configuration { message: String },

    /// The source file does not exist
    #[error("file {} is missing", path.display())]
    SourceNotFound { path: PathBuf },

    /// A configured regular expression does not compile
    #[error("invalid {what} pattern: {source}")]
    InvalidPattern {
        what: &'static str,
        #[source]
        source: regex::Error,
    },

    /// Config file could not be parsed
    #[error("invalid config in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// The source could not be split
    #[error("problem splitting {} into preamble and body: {source}", path.display())]
    Split {
        path: PathBuf,
        #[source]
        source: SplitError,
    },

    /// The compiler exited with a failure status
    #[error("{action} finished with errors")]
    Compile { action: String, code: Option<i32> },

    /// The compiler could not be started
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A file operation failed
    #[error("{op} failed: {source}")]
    Filesystem {
        op: FsOp,
        #[source]
        source: FsError,
    },

    /// The file watcher could not be set up
    #[error("problem watching {}: {message}", path.display())]
    Watch { path: PathBuf, message: String },
}

impl TexfastError {
    pub fn config(message: impl Into<String>) -> Self {
        TexfastError::Configuration {
            message: message.into(),
        }
    }

    pub fn fs(op: FsOp, source: FsError) -> Self {
        TexfastError::Filesystem { op, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TexfastError::Configuration { .. }
            | TexfastError::SourceNotFound { .. }
            | TexfastError::InvalidPattern { .. }
            | TexfastError::InvalidConfig { .. } => ErrorKind::Configuration,
            TexfastError::Split { .. } => ErrorKind::Split,
            TexfastError::Compile { .. } | TexfastError::Spawn { .. } => ErrorKind::Compile,
            TexfastError::Filesystem { .. } | TexfastError::Watch { .. } => ErrorKind::Filesystem,
        }
    }

    /// Whether this error ends the process when raised before watching starts.
    ///
    /// Output relocation and cleanup failures are reported but never end a
    /// run. Once watching, no error ends the process.
    pub fn fatal_before_watch(&self) -> bool {
        !matches!(
            self,
            TexfastError::Filesystem {
                op: FsOp::Relocate | FsOp::RewriteSynctex | FsOp::Cleanup,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_split() {
        let err = TexfastError::Split {
            path: PathBuf::from("doc.tex"),
            source: SplitError::NoMarkerFound,
        };
        assert_eq!(
            err.to_string(),
            "problem splitting doc.tex into preamble and body: no split marker found"
        );
        assert_eq!(err.kind(), ErrorKind::Split);
    }

    #[test]
    fn test_error_display_compile() {
        let err = TexfastError::Compile {
            action: "Precompile".to_string(),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "Precompile finished with errors");
        assert_eq!(err.kind(), ErrorKind::Compile);
    }

    #[test]
    fn relocation_errors_are_not_fatal() {
        let err = TexfastError::fs(
            FsOp::Relocate,
            FsError::NotFound(PathBuf::from("build/doc.pdf")),
        );
        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert!(!err.fatal_before_watch());

        let err = TexfastError::fs(
            FsOp::WriteSplit,
            FsError::PermissionDenied(PathBuf::from("doc.body.tex")),
        );
        assert!(err.fatal_before_watch());
    }

    #[test]
    fn configuration_errors_are_fatal() {
        let err = TexfastError::SourceNotFound {
            path: PathBuf::from("missing.tex"),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.fatal_before_watch());
        assert_eq!(err.to_string(), "file missing.tex is missing");
    }
}
