//! Fakes shared by the application tests

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::ports::{
    EventSink, PipelineEvent, ProcessOutput, ProcessRequest, ProcessRunner,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl RecordedCall {
    pub fn is_precompile(&self) -> bool {
        self.args.iter().any(|a| a == "-ini")
    }

    pub fn is_draft(&self) -> bool {
        self.args.iter().any(|a| a == "-draftmode")
    }

    /// The `&format file` argument
    pub fn input(&self) -> &str {
        self.args.last().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Simulate,
    Fail,
    FailPrecompile,
    Missing,
}

/// Process runner that records calls and writes what a TeX engine would.
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    behavior: Behavior,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::with(Behavior::Simulate)
    }

    pub fn failing() -> Self {
        Self::with(Behavior::Fail)
    }

    pub fn failing_precompile() -> Self {
        Self::with(Behavior::FailPrecompile)
    }

    pub fn missing_program() -> Self {
        Self::with(Behavior::Missing)
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            behavior,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn simulate(call: &RecordedCall) -> io::Result<()> {
        let job = call
            .args
            .iter()
            .find_map(|a| a.strip_prefix("-jobname="))
            .unwrap_or("texput");
        let aux = call.args.iter().any(|a| a.starts_with("-aux-directory="));
        let out_dir = call.args.iter().find_map(|a| {
            a.strip_prefix("-output-directory=")
                .or_else(|| a.strip_prefix("-aux-directory="))
        });
        let out = match out_dir {
            Some(dir) => call.cwd.join(dir),
            None => call.cwd.clone(),
        };
        let product_dir = if aux { call.cwd.clone() } else { out.clone() };

        fs::write(out.join(format!("{job}.log")), "This is TeX\n")?;
        fs::write(out.join(format!("{job}.aux")), "\\relax\n")?;
        if call.is_precompile() {
            return fs::write(out.join(format!("{job}.fmt")), "format");
        }
        if call.is_draft() {
            return Ok(());
        }
        fs::write(product_dir.join(format!("{job}.pdf")), "%PDF-1.5")?;
        if call.args.iter().any(|a| a == "--synctex=-1") {
            let input = call.input().split(' ').nth(1).unwrap_or_default();
            fs::write(
                product_dir.join(format!("{job}.synctex")),
                format!("SyncTeX Version:1\nInput:1:{}/./{input}\nInput:2:{input}\n", call.cwd.display()),
            )?;
        }
        Ok(())
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, request: &ProcessRequest<'_>) -> io::Result<ProcessOutput> {
        let call = RecordedCall {
            program: request.program.to_path_buf(),
            args: request.args.to_vec(),
            cwd: request.cwd.to_path_buf(),
        };
        self.calls.lock().unwrap().push(call.clone());

        let success = match self.behavior {
            Behavior::Missing => {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"))
            }
            Behavior::Fail => false,
            Behavior::FailPrecompile => !call.is_precompile(),
            Behavior::Simulate => true,
        };
        if success {
            Self::simulate(&call)?;
        }
        Ok(ProcessOutput {
            success,
            code: Some(if success { 0 } else { 1 }),
            output: b"captured output\n".to_vec(),
        })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::Info { message }
                | PipelineEvent::Warning { message }
                | PipelineEvent::Error { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn on_event(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Write a source file and return its path
pub fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
