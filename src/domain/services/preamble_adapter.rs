//! Preamble adaptation for engines that cannot dump every package.
//!
//! XeTeX loads system fonts when `fontspec` or `polyglossia` are read, and
//! those bindings do not survive `\dump`. Lines declaring them are moved to
//! the start of the body, and the preamble is compiled with an OT1 default
//! encoding that every later job switches back to TU.

/// Prelude prepended to an adapted preamble. It spans two lines.
pub const XETEX_ENCODING_PRELUDE: &str = "\\def\\encodingdefault{OT1}\\normalfont\n\
\\everyjob\\expandafter{\\the\\everyjob\\def\\encodingdefault{TU}\\normalfont}";

const XETEX_DEFERRED_PACKAGES: &[&str] = &["fontspec", "polyglossia"];

/// Result of adapting a preamble
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdaptedPreamble {
    pub preamble: Vec<u8>,
    /// Moved lines, in source order, without their line terminator
    pub extracted: Vec<Vec<u8>>,
}

impl AdaptedPreamble {
    /// Identity adaptation for engines without constraints
    pub fn unchanged(preamble: &[u8]) -> Self {
        Self {
            preamble: preamble.to_vec(),
            extracted: Vec::new(),
        }
    }

    /// Lines to inject at the very start of the body, newline-terminated
    pub fn body_prefix(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for line in &self.extracted {
            out.extend_from_slice(line);
            out.push(b'\n');
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreambleAdapter {
    packages: Vec<String>,
    prelude: String,
}

impl PreambleAdapter {
    pub fn xetex() -> Self {
        Self {
            packages: XETEX_DEFERRED_PACKAGES.iter().map(|p| p.to_string()).collect(),
            prelude: XETEX_ENCODING_PRELUDE.to_string(),
        }
    }

    /// Move conflicting package lines out of the preamble.
    pub fn adapt(&self, preamble: &[u8]) -> AdaptedPreamble {
        let mut adapted = self.prelude.as_bytes().to_vec();
        let mut extracted = Vec::new();

        for line in preamble.split(|b| *b == b'\n') {
            if self.declares_deferred_package(line) {
                extracted.push(line.to_vec());
            } else {
                adapted.push(b'\n');
                adapted.extend_from_slice(line);
            }
        }

        AdaptedPreamble {
            preamble: adapted,
            extracted,
        }
    }

    fn declares_deferred_package(&self, line: &[u8]) -> bool {
        self.packages
            .iter()
            .any(|pkg| contains(line, pkg.as_bytes()))
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}
