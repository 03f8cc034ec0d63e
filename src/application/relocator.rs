//! Move final products back to the user-facing names.
//!
//! Runs after a successful final compile. Every failure here is reported
//! and collected; none of them stops the cycle.

use std::path::Path;

use crate::domain::ports::{EventSink, FileSystem, FileVerb, PipelineEvent};
use crate::error::{FsOp, TexfastError};

use super::session::{CompileInput, Session};

/// Replace the first occurrence of `from` in `haystack`.
pub fn replace_first(haystack: &[u8], from: &[u8], to: &[u8]) -> Option<Vec<u8>> {
    if from.is_empty() {
        return None;
    }
    let at = haystack.windows(from.len()).position(|w| w == from)?;
    let mut out = Vec::with_capacity(haystack.len() + to.len());
    out.extend_from_slice(&haystack[..at]);
    out.extend_from_slice(to);
    out.extend_from_slice(&haystack[at + from.len()..]);
    Some(out)
}

pub struct OutputRelocator<'a, F: FileSystem> {
    session: &'a Session,
    fs: &'a F,
    sink: &'a dyn EventSink,
}

impl<'a, F: FileSystem> OutputRelocator<'a, F> {
    pub fn new(session: &'a Session, fs: &'a F, sink: &'a dyn EventSink) -> Self {
        Self { session, fs, sink }
    }

    /// Relocate the PDF and synctex, then point synctex at the user's source.
    pub fn relocate(&self, input: CompileInput) -> Vec<TexfastError> {
        let names = self.session.names();
        let synctex = self.session.config().output.synctex;
        let mut errors = Vec::new();
        let mut synctex_in_place = true;

        if names.needs_relocation(self.session.distro()) {
            let from = names.out_path("pdf");
            let to = names.user_path("pdf");
            match self.fs.copy(&from, &to) {
                Ok(()) => {
                    self.file_action(FileVerb::Copy, &from, Some(&to));
                    match self.fs.remove(&from) {
                        Ok(()) => self.file_action(FileVerb::Remove, &from, None),
                        Err(e) => errors.push(TexfastError::fs(FsOp::Relocate, e)),
                    }
                }
                Err(e) => errors.push(TexfastError::fs(FsOp::Relocate, e)),
            }

            if synctex {
                let from = names.out_path("synctex");
                let to = names.user_path("synctex");
                match self.fs.rename(&from, &to) {
                    Ok(()) => self.file_action(FileVerb::Move, &from, Some(&to)),
                    Err(e) => {
                        synctex_in_place = false;
                        errors.push(TexfastError::fs(FsOp::Relocate, e));
                    }
                }
            }
        }

        let references_internal_file = input == CompileInput::Body || names.is_normalized();
        if synctex && references_internal_file && synctex_in_place {
            if let Err(e) = self.rewrite_synctex(input) {
                errors.push(e);
            }
        }

        for error in &errors {
            self.sink.on_event(PipelineEvent::error(error.to_string()));
        }
        errors
    }

    fn rewrite_synctex(&self, input: CompileInput) -> Result<(), TexfastError> {
        let names = self.session.names();
        // Relocated, kept next to the source by -aux-directory, or never moved.
        let path = names.user_path("synctex");
        let content = self
            .fs
            .read(&path)
            .map_err(|e| TexfastError::fs(FsOp::RewriteSynctex, e))?;

        let compiled = self.session.compiled_file(input);
        let Some(rewritten) =
            replace_first(&content, compiled.as_bytes(), names.source_file().as_bytes())
        else {
            tracing::debug!(compiled = %compiled, "synctex does not reference the compiled file");
            return Ok(());
        };
        self.fs
            .write(&path, &rewritten)
            .map_err(|e| TexfastError::fs(FsOp::RewriteSynctex, e))?;
        self.file_action(FileVerb::Modify, &path, None);
        Ok(())
    }

    fn file_action(&self, verb: FileVerb, path: &Path, target: Option<&Path>) {
        self.sink.on_event(PipelineEvent::FileAction {
            verb,
            path: path.display().to_string(),
            target: target.map(|t| t.display().to_string()),
        });
    }
}
