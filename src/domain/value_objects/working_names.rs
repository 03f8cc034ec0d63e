//! Working Names Value Object
//!
//! The compiler's job name must be free of spaces and accents, and the output
//! may be redirected to a temp folder. `WorkingNames` relates the name the
//! user sees to the name the compiler works with, and derives every path the
//! pipeline touches from that relation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::Distro;

/// Remove accents (combining marks after canonical decomposition) and spaces.
pub fn normalize_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .filter(|c| *c != ' ')
        .collect()
}

/// User-facing and internal base names of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingNames {
    dir: PathBuf,
    user: String,
    job: String,
    out_dir: Option<PathBuf>,
}

impl WorkingNames {
    /// Derive the names from the source argument (`.tex` suffix optional).
    ///
    /// Returns `None` when the argument has no UTF-8 file name.
    pub fn from_source(source: &Path, normalize: bool, out_dir: Option<&Path>) -> Option<Self> {
        let file_name = source.file_name()?.to_str()?;
        let user = file_name.strip_suffix(".tex").unwrap_or(file_name);
        if user.is_empty() {
            return None;
        }
        let job = if normalize {
            normalize_name(user)
        } else {
            user.to_string()
        };
        if job.is_empty() {
            return None;
        }

        let dir = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let out_dir = out_dir
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| match (normalize, p.is_relative(), p.to_str()) {
                (true, true, Some(s)) => PathBuf::from(normalize_name(s)),
                _ => p.to_path_buf(),
            });

        Some(Self {
            dir,
            user: user.to_string(),
            job,
            out_dir,
        })
    }

    /// Directory holding the source; the compiler runs here.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Job name handed to the compiler
    pub fn job(&self) -> &str {
        &self.job
    }

    /// Output directory, relative to [`Self::dir`] unless absolute
    pub fn out_dir(&self) -> Option<&Path> {
        self.out_dir.as_deref()
    }

    /// True when the job name differs from the user-facing name.
    pub fn is_normalized(&self) -> bool {
        self.job != self.user
    }

    pub fn source_file(&self) -> String {
        format!("{}.tex", self.user)
    }

    pub fn preamble_file(&self) -> String {
        format!("{}.preamble.tex", self.job)
    }

    pub fn body_file(&self) -> String {
        format!("{}.body.tex", self.job)
    }

    /// Safe-named copy of the whole source, used when the header is skipped.
    pub fn job_source_file(&self) -> String {
        format!("{}.tex", self.job)
    }

    /// Path of a file that lives next to the source
    pub fn in_dir(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn source_path(&self) -> PathBuf {
        self.in_dir(&self.source_file())
    }

    /// Path of a compiler product (`fmt`, `log`, `pdf`, `synctex`, aux files)
    pub fn out_path(&self, ext: &str) -> PathBuf {
        let base = match &self.out_dir {
            Some(out) => self.dir.join(out).join(&self.job),
            None => self.dir.join(&self.job),
        };
        with_extension(base, ext)
    }

    /// Where the user expects a product to appear
    pub fn user_path(&self, ext: &str) -> PathBuf {
        with_extension(self.dir.join(&self.user), ext)
    }

    /// MiKTeX can keep the PDF next to the source with `-aux-directory`,
    /// but only when the job name is the user's name.
    pub fn uses_aux_directory(&self, distro: Distro) -> bool {
        self.out_dir.is_some() && !self.is_normalized() && distro.is_miktex()
    }

    /// Whether the final products must be moved back to the user-facing name
    pub fn needs_relocation(&self, distro: Distro) -> bool {
        let diverged = self.out_dir.is_some() || self.is_normalized();
        diverged && !self.uses_aux_directory(distro)
    }
}

fn with_extension(base: PathBuf, ext: &str) -> PathBuf {
    let mut name = OsString::from(base);
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
