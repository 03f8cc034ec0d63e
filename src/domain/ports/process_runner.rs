//! Process runner port
//!
//! The TeX compiler is an opaque executable: the pipeline only observes its
//! exit status and the output it produced.

use std::path::Path;

/// One execution of an external program
#[derive(Debug, Clone, Copy)]
pub struct ProcessRequest<'a> {
    pub program: &'a Path,
    pub args: &'a [String],
    /// Working directory of the child
    pub cwd: &'a Path,
    /// Forward the child's output to the terminal as it arrives
    pub echo: bool,
}

/// What a finished child left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// Combined stdout and stderr
    pub output: Vec<u8>,
}

/// Runs external programs without standard input
pub trait ProcessRunner: Send + Sync {
    /// Run to completion. `Err` means the program could not be started.
    fn run(&self, request: &ProcessRequest<'_>) -> std::io::Result<ProcessOutput>;

    /// Kill the child currently running, if any.
    fn terminate(&self) {}
}
