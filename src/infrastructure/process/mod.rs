//! Compiler process execution

mod system;

pub use system::SystemProcessRunner;

use std::path::Path;

use crate::domain::ports::{ProcessRequest, ProcessRunner};

/// First line of `<program> --version`, or `None` when it cannot be run.
pub fn probe_version(runner: &impl ProcessRunner, program: &Path) -> Option<String> {
    let args = ["--version".to_string()];
    let request = ProcessRequest {
        program,
        args: &args,
        cwd: Path::new("."),
        echo: false,
    };
    let output = runner.run(&request).ok()?;
    let text = String::from_utf8_lossy(&output.output);
    let first = text.lines().next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}
