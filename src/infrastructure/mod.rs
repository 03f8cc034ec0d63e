//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports:
//! - `fs` - local disk access with atomic writes
//! - `process` - compiler processes
//! - `events` - NDJSON event output

pub mod events;
pub mod fs;
pub mod process;

pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use process::{probe_version, SystemProcessRunner};
