//! Configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::{DEFAULT_SANITIZE_PATTERN, DEFAULT_SPLIT_PATTERN};
use crate::domain::value_objects::{ClearMode, Engine, InfoLevel, MarkerPolicy};
use crate::error::TexfastResult;

use super::loader::{self, ConfigWarning};

/// Extensions removed by the end-of-run cleanup
pub const DEFAULT_AUX_EXTENSIONS: &[&str] = &[
    "aux", "bbl", "blg", "fmt", "fff", "glg", "glo", "gls", "idx", "ilg", "ind", "lof", "lot",
    "nav", "out", "ptc", "snm", "sta", "stp", "toc",
];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: Engine,
    /// Explicit compiler executable instead of the engine's name on `PATH`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<PathBuf>,
    /// Passes before watching starts; all but the last are drafts
    pub compiles_at_start: u32,
    pub info: InfoLevel,
    /// Regex applied to the log before display, empty for the raw log
    pub log_sanitize: String,
    /// Extra options passed to every compiler invocation
    pub options: Vec<String>,
    pub split: SplitConfig,
    pub format: FormatConfig,
    pub output: OutputConfig,
    pub watch: WatchConfig,
    pub clear: ClearConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            compiler: None,
            compiles_at_start: 1,
            info: InfoLevel::default(),
            log_sanitize: DEFAULT_SANITIZE_PATTERN.to_string(),
            options: Vec::new(),
            split: SplitConfig::default(),
            format: FormatConfig::default(),
            output: OutputConfig::default(),
            watch: WatchConfig::default(),
            clear: ClearConfig::default(),
        }
    }
}

/// Where the preamble ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Empty means no split: the whole document is compiled every time.
    pub pattern: String,
    pub policy: MarkerPolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_SPLIT_PATTERN.to_string(),
            policy: MarkerPolicy::default(),
        }
    }
}

/// Precompiled format handling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Rebuild the format even if it exists
    pub precompile: bool,
    /// Never use a format; compile the whole document
    pub skip: bool,
}

/// Products of the compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub synctex: bool,
    /// Strip accents and spaces from intermediate file names
    pub normalize: bool,
    /// Folder for every intermediate file, the format included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_folder: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            synctex: true,
            normalize: true,
            temp_folder: None,
        }
    }
}

/// Change watching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub enabled: bool,
    /// Delay between a change and the recompilation it triggers
    pub debounce_ms: u64,
    /// Kill a running compiler when the tool is stopped
    pub kill_on_exit: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 10,
            kill_on_exit: false,
        }
    }
}

/// End-of-run cleanup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearConfig {
    pub mode: ClearMode,
    pub aux_extensions: Vec<String>,
}

impl Default for ClearConfig {
    fn default() -> Self {
        Self {
            mode: ClearMode::default(),
            aux_extensions: DEFAULT_AUX_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TexfastResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> TexfastResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Merge the user config and the project (or explicit) config over
    /// the defaults, then apply environment overrides.
    pub fn load_layered(
        source_dir: &Path,
        explicit: Option<&Path>,
    ) -> TexfastResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(source_dir, explicit)
    }

    /// Compiler executable: the configured path or the engine's default
    pub fn compiler_program(&self) -> PathBuf {
        self.compiler
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.engine.executable()))
    }

    /// The split pattern, or `None` when splitting is disabled
    pub fn split_pattern(&self) -> Option<&str> {
        Some(self.split.pattern.as_str()).filter(|p| !p.is_empty())
    }

    /// Header skipped explicitly or because there is nothing to split on
    pub fn skips_format(&self) -> bool {
        self.format.skip || self.split_pattern().is_none()
    }

    /// Whether auxiliary files are removed at exit
    pub fn must_clear(&self) -> bool {
        self.clear.mode.should_clear(self.watch.enabled, self.info)
    }
}
