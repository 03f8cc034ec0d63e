//! Output level and small policy enums shared by config and CLI

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How much the tool reports, ordered from silent to debug.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum InfoLevel {
    #[serde(rename = "no")]
    No,
    #[serde(rename = "errors")]
    Errors,
    #[serde(rename = "errors+log")]
    ErrorsAndLog,
    #[default]
    #[serde(rename = "actions")]
    Actions,
    #[serde(rename = "debug")]
    Debug,
}

impl InfoLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoLevel::No => "no",
            InfoLevel::Errors => "errors",
            InfoLevel::ErrorsAndLog => "errors+log",
            InfoLevel::Actions => "actions",
            InfoLevel::Debug => "debug",
        }
    }

    pub fn is_debug(&self) -> bool {
        *self == InfoLevel::Debug
    }
}

impl fmt::Display for InfoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "no" => Ok(InfoLevel::No),
            "errors" => Ok(InfoLevel::Errors),
            "errors+log" => Ok(InfoLevel::ErrorsAndLog),
            "actions" => Ok(InfoLevel::Actions),
            "debug" => Ok(InfoLevel::Debug),
            other => Err(format!(
                "invalid info level '{other}' (expected no, errors, errors+log, actions or debug)"
            )),
        }
    }
}

/// Whether auxiliary files are removed when the tool exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClearMode {
    /// Clear only when watching
    #[default]
    Auto,
    Yes,
    No,
}

impl ClearMode {
    /// Debug runs never clear, so the intermediate files can be inspected.
    pub fn should_clear(&self, watching: bool, info: InfoLevel) -> bool {
        if info.is_debug() {
            return false;
        }
        match self {
            ClearMode::Yes => true,
            ClearMode::Auto => watching,
            ClearMode::No => false,
        }
    }
}

impl FromStr for ClearMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(ClearMode::Auto),
            "yes" => Ok(ClearMode::Yes),
            "no" => Ok(ClearMode::No),
            other => Err(format!("invalid clear mode '{other}' (expected auto, yes or no)")),
        }
    }
}

/// What to do when the split marker occurs more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPolicy {
    /// The first match ends the preamble.
    #[default]
    First,
    /// Any second match is an error.
    Unique,
}

impl FromStr for MarkerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first" => Ok(MarkerPolicy::First),
            "unique" => Ok(MarkerPolicy::Unique),
            other => Err(format!("invalid split policy '{other}' (expected first or unique)")),
        }
    }
}
