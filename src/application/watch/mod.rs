//! Watch Use Case
//!
//! Recompiles the document when the source file changes.
//!
//! ## Architecture
//!
//! - `WatchUseCase` - owns the `notify` watcher and filters its events
//! - `ChangeDispatcher` - single-flight guard plus debounce, independent of
//!   `notify` so it can be driven directly in tests
//! - `Recompile` - what a change triggers (a `BuildCoordinator` cycle)

mod dispatcher;
mod use_case;


pub use dispatcher::{ChangeDispatcher, CycleGuard, CycleTicket, Recompile};
pub use use_case::{concerns_source, WatchUseCase, POLL_INTERVAL};
