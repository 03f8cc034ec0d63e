//! Domain Layer
//!
//! Pure logic of the incremental pipeline, without process or watcher I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Engine, distribution, info level, working names
//! - `services/` - Source splitting, preamble adaptation, log sanitizing
//! - `ports/` - Interfaces for the file system, compiler processes and events

pub mod ports;
pub mod services;
pub mod value_objects;
