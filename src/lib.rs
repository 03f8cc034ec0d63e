//! texfast - fast LaTeX compilation with a precompiled preamble
//!
//! The source is cut into a preamble, dumped once into a TeX format, and a
//! body compiled on top of it. While watching, only the body is recompiled,
//! and the format is rebuilt only when it is missing or forced.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildCoordinator, Session, WatchUseCase};
pub use config::Config;
pub use domain::value_objects::{Distro, Engine, InfoLevel, WorkingNames};
pub use error::{ErrorKind, SplitError, TexfastError, TexfastResult};
