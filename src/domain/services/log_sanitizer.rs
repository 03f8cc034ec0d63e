//! Compiler log sanitizing
//!
//! TeX logs are long. On failure only the error lines (`! ...`), the
//! offending line (`l.NN ...`) and a little context are worth showing.

use regex::bytes::Regex;

/// Error line, line number or `<recently read>`, plus up to two lines of context
pub const DEFAULT_SANITIZE_PATTERN: &str =
    r"(?ms)^(?:! |l\.|<recently read> ).*?$(?:\s^.*?$){0,2}";

const RULE_WIDTH: usize = 77;

/// Frame `msg` between two rules labelled `what` and `end`.
pub fn delimit(what: &str, end: &str, msg: &str) -> String {
    let line = "-".repeat(RULE_WIDTH);
    format!("{line} {what}\n{msg}\n{line} {end}")
}

#[derive(Debug, Clone, Default)]
pub struct LogSanitizer {
    pattern: Option<Regex>,
}

impl LogSanitizer {
    /// An empty pattern keeps the whole log.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        if pattern.is_empty() {
            return Ok(Self::raw());
        }
        Ok(Self {
            pattern: Some(Regex::new(pattern)?),
        })
    }

    pub fn raw() -> Self {
        Self { pattern: None }
    }

    pub fn sanitize(&self, log: &[u8]) -> String {
        let Some(pattern) = &self.pattern else {
            return delimit("raw log", "end log", &String::from_utf8_lossy(log));
        };

        let matches: Vec<&[u8]> = pattern.find_iter(log).map(|m| m.as_bytes()).collect();
        if matches.is_empty() {
            return "Nothing interesting in the log.".to_string();
        }
        let joined = matches.join(&b'\n');
        delimit(
            "sanitized log",
            "end log",
            &String::from_utf8_lossy(&joined),
        )
    }
}
