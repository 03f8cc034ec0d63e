//! Domain Services
//!
//! Stateless transformations of source and log bytes.

mod log_sanitizer;
mod preamble_adapter;
mod splitter;

pub use log_sanitizer::{delimit, LogSanitizer, DEFAULT_SANITIZE_PATTERN};
pub use preamble_adapter::{AdaptedPreamble, PreambleAdapter, XETEX_ENCODING_PRELUDE};
pub use splitter::{
    count_lines, MarkerLocator, RegexMarker, SourceSplitter, SplitArtifacts,
    DEFAULT_SPLIT_PATTERN,
};
