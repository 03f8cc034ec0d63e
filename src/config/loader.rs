//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{Engine, InfoLevel};
use crate::error::{TexfastError, TexfastResult};

use super::types::Config;

/// Project config file, looked up next to the source
pub const PROJECT_CONFIG_FILE: &str = "texfast.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> TexfastResult<(Config, Vec<ConfigWarning>)> {
    let content = read_config(path)?;
    parse_with_warnings(path, &content)
}

fn read_config(path: &Path) -> TexfastResult<String> {
    fs::read_to_string(path).map_err(|e| TexfastError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_with_warnings(path: &Path, content: &str) -> TexfastResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| TexfastError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Merge the user config and the project config (or the explicit path)
/// over the defaults, then apply environment overrides.
pub fn load_layered(
    source_dir: &Path,
    explicit: Option<&Path>,
) -> TexfastResult<(Config, Vec<ConfigWarning>)> {
    let user = dirs::config_dir()
        .map(|d| d.join("texfast").join("config.toml"))
        .filter(|p| p.is_file());
    let project = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(source_dir.join(PROJECT_CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let layers: Vec<PathBuf> = [user, project].into_iter().flatten().collect();
    let (config, warnings) = merge_layers(&layers)?;
    Ok((with_env_overrides(config), warnings))
}

/// Merge config files key by key, lowest priority first.
pub(super) fn merge_layers(layers: &[PathBuf]) -> TexfastResult<(Config, Vec<ConfigWarning>)> {
    let mut merged = toml::Table::new();
    let mut warnings = Vec::new();

    for path in layers {
        tracing::debug!(path = %path.display(), "loading config layer");
        let content = read_config(path)?;
        let (_, layer_warnings) = parse_with_warnings(path, &content)?;
        warnings.extend(layer_warnings);
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            TexfastError::InvalidConfig {
                file: path.clone(),
                message: e.to_string(),
            }
        })?;
        merge_tables(&mut merged, table);
    }

    let config = toml::Value::Table(merged).try_into::<Config>().map_err(|e| {
        TexfastError::InvalidConfig {
            file: layers.last().cloned().unwrap_or_default(),
            message: e.to_string(),
        }
    })?;
    Ok((config, warnings))
}

fn merge_tables(base: &mut toml::Table, over: toml::Table) {
    for (key, value) in over {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(over_table)) => {
                merge_tables(base_table, over_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply environment variable overrides (TEXFAST_* prefix)
fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_impl(config, |key| std::env::var(key).ok())
}

pub(super) fn with_env_overrides_impl(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // TEXFAST_ENGINE
    if let Some(engine) = get_env("TEXFAST_ENGINE").and_then(|v| v.parse::<Engine>().ok()) {
        config.engine = engine;
    }

    // TEXFAST_INFO
    if let Some(info) = get_env("TEXFAST_INFO").and_then(|v| v.parse::<InfoLevel>().ok()) {
        config.info = info;
    }

    // TEXFAST_TEMP_FOLDER (empty disables)
    if let Some(folder) = get_env("TEXFAST_TEMP_FOLDER") {
        config.output.temp_folder = Some(PathBuf::from(folder)).filter(|p| !p.as_os_str().is_empty());
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "engine",
        "compiler",
        "compiles_at_start",
        "info",
        "log_sanitize",
        "options",
        "split",
        "pattern",
        "policy",
        "format",
        "precompile",
        "skip",
        "output",
        "synctex",
        "normalize",
        "temp_folder",
        "watch",
        "enabled",
        "debounce_ms",
        "kill_on_exit",
        "clear",
        "mode",
        "aux_extensions",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
