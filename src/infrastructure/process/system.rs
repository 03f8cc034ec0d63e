//! `std::process` runner
//!
//! The child never gets a standard input: TeX in batch mode must not wait
//! for the user. Output is drained on two reader threads while the child is
//! polled, so a concurrent `terminate` can reach it.

use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crate::domain::ports::{ProcessOutput, ProcessRequest, ProcessRunner};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs programs on the local machine
#[derive(Debug, Default)]
pub struct SystemProcessRunner {
    current: Mutex<Option<Child>>,
}

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Child>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, request: &ProcessRequest<'_>) -> io::Result<ProcessOutput> {
        tracing::debug!(program = %request.program.display(), args = ?request.args, "spawning");

        let mut child = Command::new(request.program)
            .args(request.args)
            .current_dir(request.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let echo = request.echo;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || drain(stdout, echo));
        let stderr_reader = thread::spawn(move || drain(stderr, echo));

        *self.slot() = Some(child);

        let status = loop {
            {
                let mut slot = self.slot();
                match slot.as_mut() {
                    Some(child) => {
                        if let Some(status) = child.try_wait()? {
                            slot.take();
                            break Some(status);
                        }
                    }
                    None => break None,
                }
            }
            thread::sleep(POLL_INTERVAL);
        };

        let mut output = stdout_reader.join().unwrap_or_default();
        output.extend(stderr_reader.join().unwrap_or_default());

        let (success, code) = match status {
            Some(status) => (status.success(), status.code()),
            None => (false, None),
        };
        tracing::debug!(success, ?code, "child exited");

        Ok(ProcessOutput {
            success,
            code,
            output,
        })
    }

    fn terminate(&self) {
        if let Some(child) = self.slot().as_mut() {
            tracing::debug!(pid = child.id(), "terminating compiler");
            let _ = child.kill();
        }
    }
}

fn drain(source: Option<impl Read>, echo: bool) -> Vec<u8> {
    let mut collected = Vec::new();
    let Some(mut source) = source else {
        return collected;
    };
    let mut buf = [0u8; 8192];
    loop {
        match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if echo {
                    let mut out = io::stdout().lock();
                    let _ = out.write_all(&buf[..n]);
                    let _ = out.flush();
                }
                collected.extend_from_slice(&buf[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
    collected
}
