//! Precompiled format freshness
//!
//! The format `<job>.fmt` is rebuilt when it is missing, or once per process
//! when a rebuild was forced. A failed build removes whatever format is left
//! so a stale one is never used.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::ports::{EventSink, FileSystem, FileVerb, PipelineEvent, ProcessRunner};
use crate::error::TexfastResult;

use super::invoker::CompilerInvoker;
use super::session::Session;

pub const PRECOMPILE_ACTION: &str = "Precompile";

pub struct FormatCache {
    force: AtomicBool,
    format_path: PathBuf,
}

impl FormatCache {
    pub fn new(session: &Session) -> Self {
        Self {
            force: AtomicBool::new(session.config().format.precompile),
            format_path: session.format_path(),
        }
    }

    /// Whether a forced rebuild is still pending
    pub fn is_forced(&self) -> bool {
        self.force.load(Ordering::SeqCst)
    }

    /// Build the format if needed. Returns whether a build ran.
    ///
    /// Never builds when `skip_all` is set. A failed build is returned as
    /// an error for the caller to report.
    pub fn ensure_format<R: ProcessRunner, F: FileSystem>(
        &self,
        session: &Session,
        invoker: &CompilerInvoker<'_, R, F>,
        fs: &F,
        sink: &dyn EventSink,
        skip_all: bool,
    ) -> TexfastResult<bool> {
        if skip_all {
            return Ok(false);
        }
        let forced = self.force.swap(false, Ordering::SeqCst);
        if !forced && fs.exists(&self.format_path) {
            return Ok(false);
        }

        let outcome = invoker.run(PRECOMPILE_ACTION, &session.precompile_args());
        let failed = !matches!(outcome, Ok(ref o) if o.succeeded);
        if failed && fs.exists(&self.format_path) && fs.remove(&self.format_path).is_ok() {
            sink.on_event(PipelineEvent::FileAction {
                verb: FileVerb::Remove,
                path: self.format_path.display().to_string(),
                target: None,
            });
        }
        outcome?.into_result(PRECOMPILE_ACTION)?;
        Ok(true)
    }
}
