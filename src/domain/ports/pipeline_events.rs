//! Pipeline Event Port
//!
//! The pipeline never prints. It reports what it does through events, and
//! the presentation layer decides what to show (console or NDJSON).

use serde::Serialize;

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileVerb {
    Create,
    Copy,
    Move,
    Modify,
    Remove,
}

impl FileVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileVerb::Create => "create",
            FileVerb::Copy => "copy",
            FileVerb::Move => "move",
            FileVerb::Modify => "modify",
            FileVerb::Remove => "remove",
        }
    }
}

/// Event emitted during compilation and watching
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A timed action (precompile, compile) started
    ActionStarted { action: String },
    /// A timed action finished
    ActionFinished {
        action: String,
        success: bool,
        seconds: f64,
    },
    /// Exact command line about to run
    Command { program: String, args: Vec<String> },
    /// A file was created, copied, moved, modified or removed
    FileAction {
        verb: FileVerb,
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    /// Excerpt of the compiler log
    CompileLog { excerpt: String },
    Info { message: String },
    Warning { message: String },
    Error { message: String },
    /// Watching the source file started
    WatchStarted { source: String },
    /// Source file changed, a cycle is scheduled
    FileChanged { path: String },
    /// Source file changed while a cycle was in flight
    ChangeIgnored { path: String },
    /// A cycle triggered by a change ended
    WaitingForChanges,
    /// Watch stopped
    Shutdown,
}

impl PipelineEvent {
    pub fn info(message: impl Into<String>) -> Self {
        PipelineEvent::Info {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        PipelineEvent::Warning {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PipelineEvent::Error {
            message: message.into(),
        }
    }

    /// Serialize as one NDJSON line
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Trait for receiving pipeline events
///
/// Implementations:
/// - `ConsoleEventSink`: human-readable output filtered by info level
/// - `JsonEventSink`: NDJSON event stream
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: PipelineEvent);
}
