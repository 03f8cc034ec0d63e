//! Source splitting
//!
//! Cuts a document into a preamble, which is dumped once into a format file,
//! and a body, which is recompiled on every change. The body is padded so
//! that its line numbers match the original source: compiler diagnostics and
//! synctex data then point at the right lines of the file the user edits.

use regex::bytes::Regex;

use crate::domain::value_objects::MarkerPolicy;
use crate::error::SplitError;

use super::preamble_adapter::{AdaptedPreamble, PreambleAdapter};

/// `% end preamble` or `\begin{document}` at the start of a line
pub const DEFAULT_SPLIT_PATTERN: &str =
    r"(?m)^\s*(?:%\s*end\s*preamble|\\begin\{document\})";

/// Directive terminating the preamble: stop and write the format.
const DUMP_DIRECTIVE: &[u8] = b"\\dump";

/// Finds where the preamble ends.
pub trait MarkerLocator: Send + Sync {
    /// Byte offsets of every marker match, in ascending order
    fn match_starts(&self, source: &[u8]) -> Vec<usize>;
}

/// Marker given as a regular expression
#[derive(Debug, Clone)]
pub struct RegexMarker {
    regex: Regex,
}

impl RegexMarker {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl MarkerLocator for RegexMarker {
    fn match_starts(&self, source: &[u8]) -> Vec<usize> {
        self.regex.find_iter(source).map(|m| m.start()).collect()
    }
}

/// The two working files produced from one source snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitArtifacts {
    /// Preamble ending with `\dump`
    pub preamble: Vec<u8>,
    /// Body starting with `%&<job>` and the line padding
    pub body: Vec<u8>,
    /// Blank lines inserted after the format directive
    pub padding: usize,
    /// Lines moved from the preamble to the start of the body
    pub moved_lines: usize,
}

/// Count line terminators.
pub fn count_lines(text: &[u8]) -> usize {
    text.iter().filter(|b| **b == b'\n').count()
}

pub struct SourceSplitter<M = RegexMarker> {
    marker: M,
    policy: MarkerPolicy,
    adapter: Option<PreambleAdapter>,
}

impl<M: MarkerLocator> SourceSplitter<M> {
    pub fn new(marker: M, policy: MarkerPolicy) -> Self {
        Self {
            marker,
            policy,
            adapter: None,
        }
    }

    pub fn with_adapter(mut self, adapter: Option<PreambleAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    /// Byte offset where the body starts
    pub fn locate(&self, source: &[u8]) -> Result<usize, SplitError> {
        let starts = self.marker.match_starts(source);
        match (starts.first(), self.policy) {
            (None, _) => Err(SplitError::NoMarkerFound),
            (Some(_), MarkerPolicy::Unique) if starts.len() > 1 => {
                Err(SplitError::AmbiguousMarker {
                    count: starts.len(),
                })
            }
            (Some(start), _) => Ok(*start),
        }
    }

    /// Split `source` into the preamble and body files for job `job`.
    pub fn split(&self, source: &[u8], job: &str) -> Result<SplitArtifacts, SplitError> {
        let at = self.locate(source)?;
        let (raw_preamble, raw_body) = source.split_at(at);

        let adapted = match &self.adapter {
            Some(adapter) => adapter.adapt(raw_preamble),
            None => AdaptedPreamble::unchanged(raw_preamble),
        };

        let mut preamble = adapted.preamble.clone();
        preamble.extend_from_slice(DUMP_DIRECTIVE);

        // Moved lines are real content in the body, not padding.
        let moved_lines = adapted.extracted.len();
        let padding = count_lines(raw_preamble)
            .saturating_sub(moved_lines)
            .max(1);

        let mut body = Vec::with_capacity(job.len() + 2 + padding + raw_body.len());
        body.extend_from_slice(b"%&");
        body.extend_from_slice(job.as_bytes());
        body.resize(body.len() + padding, b'\n');
        body.extend_from_slice(&adapted.body_prefix());
        body.extend_from_slice(raw_body);

        Ok(SplitArtifacts {
            preamble,
            body,
            padding,
            moved_lines,
        })
    }
}
