//! Human-readable event output
//!
//! Mirrors the classic console layout: `::::::: Compile...done [1.2s]`,
//! file actions indented by one space, framed compiler excerpts.

use std::io::{self, Write};
use std::sync::Mutex;

use texfast::domain::ports::{EventSink, PipelineEvent};
use texfast::domain::services::delimit;
use texfast::domain::value_objects::InfoLevel;

use crate::ui::theme::{colors, paint, ACTION_PREFIX};

/// Minimum info level at which an event is shown
pub fn required_level(event: &PipelineEvent) -> InfoLevel {
    match event {
        PipelineEvent::Error { .. } | PipelineEvent::Warning { .. } => InfoLevel::Errors,
        PipelineEvent::CompileLog { .. } => InfoLevel::ErrorsAndLog,
        PipelineEvent::Command { .. } | PipelineEvent::ChangeIgnored { .. } => InfoLevel::Debug,
        PipelineEvent::ActionStarted { .. }
        | PipelineEvent::ActionFinished { .. }
        | PipelineEvent::FileAction { .. }
        | PipelineEvent::Info { .. }
        | PipelineEvent::WatchStarted { .. }
        | PipelineEvent::FileChanged { .. }
        | PipelineEvent::WaitingForChanges
        | PipelineEvent::Shutdown => InfoLevel::Actions,
    }
}

/// Render an event, or `None` when `level` hides it.
pub fn render_event(event: &PipelineEvent, level: InfoLevel, color: bool) -> Option<String> {
    if level < required_level(event) {
        return None;
    }
    let text = match event {
        PipelineEvent::ActionStarted { action } => format!("{ACTION_PREFIX} {action}..."),
        PipelineEvent::ActionFinished {
            success, seconds, ..
        } => {
            let c = if *success {
                colors::SUCCESS
            } else {
                colors::ERROR
            };
            format!("{}\n", paint(&format!("done [{seconds:.1}s]"), c, color))
        }
        PipelineEvent::Command { program, args } => {
            let line = std::iter::once(program.as_str())
                .chain(args.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}\n", delimit("command", "", &line))
        }
        PipelineEvent::FileAction { verb, path, target } => match target {
            Some(target) => format!(" {} {} -> {}\n", verb.as_str(), path, target),
            None => format!(" {} {}\n", verb.as_str(), path),
        },
        PipelineEvent::CompileLog { excerpt } => format!("{excerpt}\n"),
        PipelineEvent::Info { message } => format!("{message}\n"),
        PipelineEvent::Warning { message } => {
            format!("{}\n", paint(&format!("Warning: {message}"), colors::WARNING, color))
        }
        PipelineEvent::Error { message } => {
            format!("{}\n", paint(&format!("Error: {message}"), colors::ERROR, color))
        }
        PipelineEvent::WatchStarted { source } => format!(
            "{}\n",
            paint(
                &format!("Watching {source} for changes. Press Ctrl+C to stop."),
                colors::INFO,
                color
            )
        ),
        PipelineEvent::FileChanged { path } => {
            format!("{}\n", paint(&format!("Changed: {path}"), colors::DIM, color))
        }
        PipelineEvent::ChangeIgnored { path } => format!(
            "{}\n",
            paint(&format!("Ignored change of {path}, busy"), colors::DIM, color)
        ),
        PipelineEvent::WaitingForChanges => "Wait for new changes...\n".to_string(),
        PipelineEvent::Shutdown => "End.\n".to_string(),
    };
    Some(text)
}

pub struct ConsoleEventSink {
    level: InfoLevel,
    color: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(level: InfoLevel, color: bool) -> Self {
        Self::with_writer(io::stdout(), level, color)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, level: InfoLevel, color: bool) -> Self {
        Self {
            level,
            color,
            out: Mutex::new(Box::new(writer)),
        }
    }
}

impl EventSink for ConsoleEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let Some(text) = render_event(&event, self.level, self.color) else {
            return;
        };
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}
