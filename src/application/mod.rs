//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT contain splitting or naming rules (those are in Domain)
//! - Drives the compiler and file system through ports
//!
//! ## Use Cases
//!
//! - `BuildCoordinator` - One cycle: split, precompile, compile, relocate
//! - `WatchUseCase` - Recompiles on source changes
//! - `cleanup` - End-of-run removal of intermediate files
//!
//! ## Services
//!
//! - `Session` - Resolved context and compiler argument sets
//! - `CompilerInvoker` - Runs and times one compiler pass
//! - `FormatCache` - Decides when the precompiled format is rebuilt
//! - `OutputRelocator` - Moves PDF and synctex to the user-facing name

mod cleanup;
pub mod coordinator;
mod format_cache;
mod invoker;
mod relocator;
pub mod session;
mod split;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_support;

pub use cleanup::cleanup;
pub use coordinator::{BuildCoordinator, CycleReport, CycleState};
pub use format_cache::{FormatCache, PRECOMPILE_ACTION};
pub use invoker::{CompileOutcome, CompilerInvoker};
pub use relocator::{replace_first, OutputRelocator};
pub use session::{CompileInput, Pass, Session};
pub use split::{read_source, split_source, READ_RETRY_DELAY};
pub use watch::{ChangeDispatcher, CycleGuard, CycleTicket, Recompile, WatchUseCase};
