//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{EventSink, PipelineEvent};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl EventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event.to_json());
            let _ = writer.flush();
        }
    }
}
