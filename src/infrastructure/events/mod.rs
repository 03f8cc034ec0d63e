//! Event Sink Implementations
//!
//! - `JsonEventSink`: NDJSON output for editors and automation
//!
//! Human-readable output lives in `ui::ConsoleEventSink`.

mod json;

pub use json::JsonEventSink;
