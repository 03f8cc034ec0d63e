//! Single-flight change dispatch

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::domain::ports::{EventSink, PipelineEvent};

/// Work triggered by a source change
pub trait Recompile: Send + Sync + 'static {
    fn recompile(&self);

    /// Stop work in flight, if possible
    fn interrupt(&self) {}
}

/// At most one cycle scheduled or running at a time
#[derive(Debug, Clone, Default)]
pub struct CycleGuard {
    busy: Arc<AtomicBool>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<CycleTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| CycleTicket {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

/// Releases the guard when dropped
#[derive(Debug)]
pub struct CycleTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for CycleTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Turns change notifications into debounced, non-overlapping cycles.
///
/// The guard is taken when the change arrives, so changes during the
/// debounce delay or the cycle itself are dropped, not queued.
pub struct ChangeDispatcher<C: Recompile> {
    target: Arc<C>,
    sink: Arc<dyn EventSink>,
    debounce: Duration,
    guard: CycleGuard,
    cancel: Mutex<Option<Sender<()>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<C: Recompile> ChangeDispatcher<C> {
    pub fn new(target: Arc<C>, sink: Arc<dyn EventSink>, debounce: Duration) -> Self {
        Self {
            target,
            sink,
            debounce,
            guard: CycleGuard::new(),
            cancel: Mutex::new(None),
            worker: Mutex::new(None),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Schedule a cycle for a change of `path`. Returns false if dropped.
    pub fn on_change(&self, path: &Path) -> bool {
        let Some(ticket) = self.guard.try_acquire() else {
            self.sink.on_event(PipelineEvent::ChangeIgnored {
                path: path.display().to_string(),
            });
            return false;
        };
        self.sink.on_event(PipelineEvent::FileChanged {
            path: path.display().to_string(),
        });

        let (cancel_tx, cancel_rx) = channel::<()>();
        let target = Arc::clone(&self.target);
        let sink = Arc::clone(&self.sink);
        let debounce = self.debounce;

        let handle = thread::spawn(move || {
            let _ticket = ticket;
            match cancel_rx.recv_timeout(debounce) {
                Err(RecvTimeoutError::Timeout) => {
                    target.recompile();
                    sink.on_event(PipelineEvent::WaitingForChanges);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("scheduled cycle cancelled");
                }
            }
        });

        *self.cancel.lock().unwrap_or_else(|e| e.into_inner()) = Some(cancel_tx);
        let previous = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);
        // The previous worker released its ticket, so it is done or about to be.
        if let Some(previous) = previous {
            let _ = previous.join();
        }
        true
    }

    /// Cancel a pending cycle, optionally interrupt a running one, and wait.
    pub fn shutdown(&self, interrupt: bool) {
        if let Some(cancel) = self.cancel.lock().unwrap_or_else(|e| e.into_inner()).take() {
            let _ = cancel.send(());
        }
        if interrupt && self.guard.is_busy() {
            self.target.interrupt();
        }
        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(worker) = worker {
            let _ = worker.join();
        }
    }
}
