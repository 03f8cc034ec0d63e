//! Configuration module for texfast
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority, applied by the binary)
//! 2. Environment variables (TEXFAST_*)
//! 3. Project config (`texfast.toml` next to the source, or `--config`)
//! 4. User config (`~/.config/texfast/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{
    ClearConfig, Config, FormatConfig, OutputConfig, SplitConfig, WatchConfig,
    DEFAULT_AUX_EXTENSIONS,
};
