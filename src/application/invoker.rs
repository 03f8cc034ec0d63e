//! Compiler invocation
//!
//! Runs one compiler pass, times it, and reports the sanitized log on
//! failure (or always in debug mode).

use std::time::Instant;

use crate::domain::ports::{EventSink, FileSystem, PipelineEvent, ProcessRequest, ProcessRunner};
use crate::error::{TexfastError, TexfastResult};

use super::session::Session;

/// Result of a compiler pass that could be started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    pub succeeded: bool,
    pub code: Option<i32>,
    /// Combined output captured from the compiler
    pub log: Vec<u8>,
}

impl CompileOutcome {
    /// Turn a failed pass into a compile error
    pub fn into_result(self, action: &str) -> TexfastResult<()> {
        if self.succeeded {
            Ok(())
        } else {
            Err(TexfastError::Compile {
                action: action.to_string(),
                code: self.code,
            })
        }
    }
}

pub struct CompilerInvoker<'a, R: ProcessRunner, F: FileSystem> {
    session: &'a Session,
    runner: &'a R,
    fs: &'a F,
    sink: &'a dyn EventSink,
}

impl<'a, R: ProcessRunner, F: FileSystem> CompilerInvoker<'a, R, F> {
    pub fn new(session: &'a Session, runner: &'a R, fs: &'a F, sink: &'a dyn EventSink) -> Self {
        Self {
            session,
            runner,
            fs,
            sink,
        }
    }

    /// Run the compiler with `args` in the source folder.
    ///
    /// A non-zero exit is a normal outcome; only failing to start the
    /// compiler is an error.
    pub fn run(&self, action: &str, args: &[String]) -> TexfastResult<CompileOutcome> {
        let program = self.session.compiler();
        let debug = self.session.config().info.is_debug();

        self.sink.on_event(PipelineEvent::Command {
            program: program.display().to_string(),
            args: args.to_vec(),
        });
        self.sink.on_event(PipelineEvent::ActionStarted {
            action: action.to_string(),
        });

        let started = Instant::now();
        let request = ProcessRequest {
            program,
            args,
            cwd: self.session.names().dir(),
            echo: debug,
        };
        let result = self.runner.run(&request);
        let seconds = started.elapsed().as_secs_f64();

        let output = match result {
            Ok(output) => output,
            Err(source) => {
                self.sink.on_event(PipelineEvent::ActionFinished {
                    action: action.to_string(),
                    success: false,
                    seconds,
                });
                return Err(TexfastError::Spawn {
                    program: program.display().to_string(),
                    source,
                });
            }
        };

        tracing::debug!(action, code = ?output.code, seconds, "compiler pass finished");
        self.sink.on_event(PipelineEvent::ActionFinished {
            action: action.to_string(),
            success: output.success,
            seconds,
        });

        let outcome = CompileOutcome {
            succeeded: output.success,
            code: output.code,
            log: output.output,
        };
        if !outcome.succeeded || debug {
            let log = self.read_log(&outcome.log);
            self.sink.on_event(PipelineEvent::CompileLog {
                excerpt: self.session.sanitizer().sanitize(&log),
            });
        }
        Ok(outcome)
    }

    /// The `.log` the pass wrote, or its captured output when there is none.
    fn read_log(&self, captured: &[u8]) -> Vec<u8> {
        let log_path = self.session.names().out_path("log");
        match self.fs.read(&log_path) {
            Ok(log) => log,
            Err(err) => {
                tracing::debug!(%err, "compiler log unavailable, using captured output");
                captured.to_vec()
            }
        }
    }
}
