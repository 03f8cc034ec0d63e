//! Engine Value Object
//!
//! Which TeX engine compiles the document, and which distribution ships it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// TeX engine used for both the precompile and the document passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// `pdftex` with the `pdflatex` format (default)
    #[default]
    PdfTex,
    /// `xetex` with the `xelatex` format
    XeTex,
}

impl Engine {
    /// Executable name looked up on `PATH`
    pub fn executable(&self) -> &'static str {
        match self {
            Engine::PdfTex => "pdftex",
            Engine::XeTex => "xetex",
        }
    }

    /// Name of the LaTeX format the preamble is built on
    pub fn latex_format(&self) -> &'static str {
        match self {
            Engine::PdfTex => "pdflatex",
            Engine::XeTex => "xelatex",
        }
    }

    /// XeTeX cannot dump fonts loaded by `fontspec`, so its preamble is adapted.
    pub fn needs_preamble_adapter(&self) -> bool {
        matches!(self, Engine::XeTex)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdftex" | "pdflatex" => Ok(Engine::PdfTex),
            "xetex" | "xelatex" => Ok(Engine::XeTex),
            other => Err(format!("unknown engine '{other}' (expected pdftex or xetex)")),
        }
    }
}

/// TeX distribution, detected from `<engine> --version`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Distro {
    TexLive,
    MiKTeX,
    #[default]
    Unknown,
}

impl Distro {
    /// Recognize the distribution from the first line of the version banner.
    pub fn from_version_line(line: &str) -> Self {
        if line.contains("MiKTeX") {
            Distro::MiKTeX
        } else if line.contains("TeX Live") {
            Distro::TexLive
        } else {
            Distro::Unknown
        }
    }

    pub fn is_miktex(&self) -> bool {
        matches!(self, Distro::MiKTeX)
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Distro::TexLive => "texlive",
            Distro::MiKTeX => "miktex",
            Distro::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
