//! Watch Use Case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::coordinator::BuildCoordinator;
use crate::application::session::Pass;
use crate::domain::ports::{EventSink, FileSystem, PipelineEvent, ProcessRunner};
use crate::error::{TexfastError, TexfastResult};

use super::dispatcher::{ChangeDispatcher, Recompile};

/// How often the loop checks the running flag
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

impl<R, F> Recompile for BuildCoordinator<R, F>
where
    R: ProcessRunner + 'static,
    F: FileSystem + 'static,
{
    fn recompile(&self) {
        if let Err(err) = self.run_cycle(Pass::Final) {
            self.sink().on_event(PipelineEvent::error(err.to_string()));
        }
    }

    fn interrupt(&self) {
        self.runner().terminate();
    }
}

/// Whether a `notify` event is a content change of `source`
pub fn concerns_source(event: &Event, source: &Path) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any) {
        return false;
    }
    event.paths.iter().any(|path| {
        path == source
            || path
                .canonicalize()
                .map(|p| p == source)
                .unwrap_or(false)
    })
}

/// Watches one source file
///
/// The parent directory is watched, not the file: editors often replace
/// the file on save, which would end a watch placed on the file itself.
pub struct WatchUseCase {
    source: PathBuf,
}

impl WatchUseCase {
    pub fn new(source: &Path) -> Self {
        let source = source
            .canonicalize()
            .unwrap_or_else(|_| source.to_path_buf());
        Self { source }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Start watching (blocking)
    ///
    /// Returns when the running flag is cleared. The dispatcher is left for
    /// the caller to shut down.
    pub fn start<C: Recompile>(
        &self,
        running: Arc<AtomicBool>,
        dispatcher: &ChangeDispatcher<C>,
        sink: &dyn EventSink,
    ) -> TexfastResult<()> {
        let watch_error = |e: notify::Error| TexfastError::Watch {
            path: self.source.clone(),
            message: e.to_string(),
        };
        let dir = self
            .source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(watch_error)?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(watch_error)?;

        sink.on_event(PipelineEvent::WatchStarted {
            source: self.source.display().to_string(),
        });

        while running.load(Ordering::SeqCst) {
            if let Ok(notification) = rx.recv_timeout(POLL_INTERVAL) {
                self.handle(notification, dispatcher, sink);
            }
        }

        sink.on_event(PipelineEvent::Shutdown);
        Ok(())
    }

    /// React to one watcher notification. Watcher errors are reported and
    /// the loop goes on.
    pub fn handle<C: Recompile>(
        &self,
        notification: Result<Event, notify::Error>,
        dispatcher: &ChangeDispatcher<C>,
        sink: &dyn EventSink,
    ) {
        match notification {
            Ok(event) if concerns_source(&event, &self.source) => {
                tracing::trace!(kind = ?event.kind, "source changed");
                dispatcher.on_change(&self.source);
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, "watcher error");
                let err = TexfastError::Watch {
                    path: self.source.clone(),
                    message: err.to_string(),
                };
                sink.on_event(PipelineEvent::error(err.to_string()));
            }
        }
    }
}
