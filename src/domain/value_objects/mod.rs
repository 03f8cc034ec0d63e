//! Value Objects
//!
//! Immutable types describing how a document is compiled.

mod engine;
mod info_level;
mod working_names;

pub use engine::{Distro, Engine};
pub use info_level::{ClearMode, InfoLevel, MarkerPolicy};
pub use working_names::{normalize_name, WorkingNames};
