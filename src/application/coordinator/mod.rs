//! Build cycle coordination
//!
//! One cycle goes Idle → Splitting → Precompiling → Compiling →
//! (Relocating) → Idle. The state is always back to Idle when a cycle
//! returns, whatever its outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::ports::{EventSink, FileSystem, FileVerb, PipelineEvent, ProcessRunner};
use crate::error::{FsOp, TexfastError, TexfastResult};

use super::format_cache::FormatCache;
use super::invoker::CompilerInvoker;
use super::relocator::OutputRelocator;
use super::session::{CompileInput, Pass, Session};
use super::split::split_source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    Splitting,
    Precompiling,
    Compiling,
    Relocating,
}

/// What a completed cycle did
#[derive(Debug)]
pub struct CycleReport {
    pub pass: Pass,
    pub format_built: bool,
    pub input: CompileInput,
    /// Reported relocation failures
    pub relocation_errors: Vec<TexfastError>,
}

pub struct BuildCoordinator<R: ProcessRunner, F: FileSystem> {
    session: Arc<Session>,
    runner: Arc<R>,
    fs: F,
    sink: Arc<dyn EventSink>,
    format: FormatCache,
    state: Mutex<CycleState>,
}

impl<R: ProcessRunner, F: FileSystem> BuildCoordinator<R, F> {
    pub fn new(session: Arc<Session>, runner: Arc<R>, fs: F, sink: Arc<dyn EventSink>) -> Self {
        let format = FormatCache::new(&session);
        Self {
            session,
            runner,
            fs,
            sink,
            format,
            state: Mutex::new(CycleState::Idle),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn sink(&self) -> &dyn EventSink {
        self.sink.as_ref()
    }

    pub fn state(&self) -> CycleState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn enter(&self, state: CycleState) {
        tracing::trace!(?state, "cycle state");
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    fn invoker(&self) -> CompilerInvoker<'_, R, F> {
        CompilerInvoker::new(&self.session, &self.runner, &self.fs, self.sink.as_ref())
    }

    /// Run the startup passes: drafts first, the last one final.
    ///
    /// With zero passes only the split and format are prepared. No new pass
    /// starts once `running` is cleared.
    pub fn startup(&self, passes: u32, running: &AtomicBool) -> TexfastResult<()> {
        if passes == 0 {
            let result = self.prepare();
            self.enter(CycleState::Idle);
            return result.map(|_| ());
        }
        for n in 1..=passes {
            if !running.load(Ordering::SeqCst) {
                tracing::debug!(pass = n, "shutdown requested, skipping remaining passes");
                break;
            }
            let pass = if n < passes { Pass::Draft } else { Pass::Final };
            self.run_cycle(pass)?;
        }
        Ok(())
    }

    /// One full cycle on the current source
    pub fn run_cycle(&self, pass: Pass) -> TexfastResult<CycleReport> {
        let result = self.cycle(pass);
        self.enter(CycleState::Idle);
        result
    }

    /// Split and build the format if needed. Returns whether a format was built.
    fn prepare(&self) -> TexfastResult<bool> {
        let names = self.session.names();
        if let Some(out_dir) = names.out_dir() {
            let path = names.dir().join(out_dir);
            if !path.is_dir() {
                self.fs
                    .create_dir_all(&path)
                    .map_err(|e| TexfastError::fs(FsOp::CreateOutputDir, e))?;
                self.sink.on_event(PipelineEvent::FileAction {
                    verb: FileVerb::Create,
                    path: path.display().to_string(),
                    target: None,
                });
            }
        }

        self.enter(CycleState::Splitting);
        split_source(&self.session, &self.fs, self.sink.as_ref())?;

        self.enter(CycleState::Precompiling);
        let invoker = self.invoker();
        match self.format.ensure_format(
            &self.session,
            &invoker,
            &self.fs,
            self.sink.as_ref(),
            self.session.skips_format(),
        ) {
            Ok(built) => Ok(built),
            Err(err) => {
                self.sink.on_event(PipelineEvent::warning(format!(
                    "Problem with the preamble compilation: {err}"
                )));
                Ok(false)
            }
        }
    }

    fn cycle(&self, pass: Pass) -> TexfastResult<CycleReport> {
        let format_built = self.prepare()?;

        self.enter(CycleState::Compiling);
        let input = self.choose_input()?;
        let action = compile_action(pass, input, &self.session);
        self.invoker()
            .run(&action, &self.session.compile_args(pass, input))?
            .into_result(&action)?;

        let relocation_errors = if pass == Pass::Final {
            self.enter(CycleState::Relocating);
            OutputRelocator::new(&self.session, &self.fs, self.sink.as_ref()).relocate(input)
        } else {
            Vec::new()
        };

        Ok(CycleReport {
            pass,
            format_built,
            input,
            relocation_errors,
        })
    }

    /// Body on the format when it exists, otherwise the whole source.
    fn choose_input(&self) -> TexfastResult<CompileInput> {
        let names = self.session.names();
        let input = if self.session.skips_format() {
            CompileInput::WholeSource
        } else if self.fs.exists(&self.session.format_path()) {
            CompileInput::Body
        } else {
            self.sink.on_event(PipelineEvent::warning(
                "No precompiled format, compiling the whole document",
            ));
            CompileInput::WholeSource
        };

        if input == CompileInput::WholeSource && names.is_normalized() {
            let from = names.source_path();
            let to = names.in_dir(&names.job_source_file());
            if !self.session.owns_source_copy() && self.fs.exists(&to) {
                return Err(TexfastError::config(format!(
                    "{} already exists, refusing to overwrite it with a copy of {}",
                    to.display(),
                    from.display()
                )));
            }
            self.fs
                .copy(&from, &to)
                .map_err(|e| TexfastError::fs(FsOp::CopySource, e))?;
            self.session.mark_source_copy();
            self.sink.on_event(PipelineEvent::FileAction {
                verb: FileVerb::Copy,
                path: from.display().to_string(),
                target: Some(to.display().to_string()),
            });
        }
        Ok(input)
    }
}

fn compile_action(pass: Pass, input: CompileInput, session: &Session) -> String {
    let draft = if pass == Pass::Draft { "draft " } else { "" };
    match input {
        CompileInput::Body => format!(
            "Compile {draft}(use precompiled {}.fmt)",
            session.names().job()
        ),
        CompileInput::WholeSource => format!("Compile {draft}(skip precompile)"),
    }
}
