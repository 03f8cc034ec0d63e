//! Session: the resolved context every pipeline component works from.
//!
//! Built once at startup from the configuration, the source argument and
//! the detected distribution. Components receive it explicitly instead of
//! reading process-wide settings.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Config;
use crate::domain::services::{LogSanitizer, PreambleAdapter, RegexMarker, SourceSplitter};
use crate::domain::value_objects::{Distro, WorkingNames};
use crate::error::{TexfastError, TexfastResult};

const BATCH_OPTIONS: &[&str] = &["-interaction=batchmode", "-halt-on-error"];

/// Kind of document compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Resolves references, writes no PDF
    Draft,
    /// Writes the PDF and synctex
    Final,
}

/// What the document compile reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileInput {
    /// `<job>.body.tex` on top of the precompiled format
    Body,
    /// The whole source on top of the engine's stock format
    WholeSource,
}

pub struct Session {
    config: Config,
    names: WorkingNames,
    distro: Distro,
    compiler: PathBuf,
    sanitizer: LogSanitizer,
    splitter: Option<SourceSplitter>,
    /// Set once `<job>.tex` has been written by this process
    source_copy: AtomicBool,
}

impl Session {
    pub fn new(config: Config, source: &Path, distro: Distro) -> TexfastResult<Self> {
        let names = WorkingNames::from_source(
            source,
            config.output.normalize,
            config.output.temp_folder.as_deref(),
        )
        .ok_or_else(|| {
            TexfastError::config(format!("invalid source file name: {}", source.display()))
        })?;

        if !names.source_path().is_file() {
            return Err(TexfastError::SourceNotFound {
                path: names.source_path(),
            });
        }

        let sanitizer = LogSanitizer::new(&config.log_sanitize).map_err(|source| {
            TexfastError::InvalidPattern {
                what: "log sanitize",
                source,
            }
        })?;

        let splitter = match config.split_pattern() {
            Some(pattern) if !config.skips_format() => {
                let marker = RegexMarker::new(pattern).map_err(|source| {
                    TexfastError::InvalidPattern {
                        what: "split",
                        source,
                    }
                })?;
                let adapter = config
                    .engine
                    .needs_preamble_adapter()
                    .then(PreambleAdapter::xetex);
                Some(SourceSplitter::new(marker, config.split.policy).with_adapter(adapter))
            }
            _ => None,
        };

        let compiler = config.compiler_program();

        Ok(Self {
            config,
            names,
            distro,
            compiler,
            sanitizer,
            splitter,
            source_copy: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn names(&self) -> &WorkingNames {
        &self.names
    }

    pub fn distro(&self) -> Distro {
        self.distro
    }

    /// Compiler executable
    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    pub fn sanitizer(&self) -> &LogSanitizer {
        &self.sanitizer
    }

    /// `None` when the whole document is compiled every time
    pub fn splitter(&self) -> Option<&SourceSplitter> {
        self.splitter.as_ref()
    }

    pub fn skips_format(&self) -> bool {
        self.splitter.is_none()
    }

    /// Whether `<job>.tex` is a copy this process made of a normalized source
    pub fn owns_source_copy(&self) -> bool {
        self.source_copy.load(Ordering::SeqCst)
    }

    pub(crate) fn mark_source_copy(&self) {
        self.source_copy.store(true, Ordering::SeqCst);
    }

    pub fn format_path(&self) -> PathBuf {
        self.names.out_path("fmt")
    }

    fn directory_option(&self) -> Option<String> {
        let out = self.names.out_dir()?;
        let flag = if self.names.uses_aux_directory(self.distro) {
            "-aux-directory"
        } else {
            "-output-directory"
        };
        Some(format!("{}={}", flag, out.display()))
    }

    /// Arguments of the pass that dumps the preamble into `<job>.fmt`
    pub fn precompile_args(&self) -> Vec<String> {
        let mut args: Vec<String> = BATCH_OPTIONS.iter().map(|s| s.to_string()).collect();
        args.push("-ini".to_string());
        args.extend(self.config.options.iter().cloned());
        args.extend(self.directory_option());
        args.push(format!("-jobname={}", self.names.job()));
        args.push(format!(
            "&{} {}",
            self.config.engine.latex_format(),
            self.names.preamble_file()
        ));
        args
    }

    /// Arguments of a document compile
    pub fn compile_args(&self, pass: Pass, input: CompileInput) -> Vec<String> {
        let mut args: Vec<String> = BATCH_OPTIONS.iter().map(|s| s.to_string()).collect();
        if self.config.output.synctex {
            args.push("--synctex=-1".to_string());
        }
        args.extend(self.config.options.iter().cloned());
        args.extend(self.directory_option());
        if pass == Pass::Draft {
            args.push("-draftmode".to_string());
        }
        args.push(format!("-jobname={}", self.names.job()));
        args.push(match input {
            CompileInput::Body => format!("&{} {}", self.names.job(), self.names.body_file()),
            CompileInput::WholeSource => format!(
                "&{} {}",
                self.config.engine.latex_format(),
                self.names.job_source_file()
            ),
        });
        args
    }

    /// Name of the file the compile read, as it appears in synctex data
    pub fn compiled_file(&self, input: CompileInput) -> String {
        match input {
            CompileInput::Body => self.names.body_file(),
            CompileInput::WholeSource => self.names.job_source_file(),
        }
    }
}
