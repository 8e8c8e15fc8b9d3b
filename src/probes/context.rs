//! Isolated execution contexts
//!
//! Each context is a named OS thread that owns nothing but a handle to an
//! immutable workload. It receives exactly one start message and sends at
//! most one result message; a context abandoned at the deadline also gets a
//! cancel message. Contexts share no mutable state and never synchronise with
//! each other.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::constants::multi_core::CONTEXT_STACK_SIZE;
use crate::error::BenchError;
use crate::kernel::{KernelOutcome, StopSignal, Workload};

/// Inbound one-shot message
#[derive(Debug, Clone, Copy)]
pub struct StartMessage {
    pub duration_ms: f64,
}

/// Outbound one-shot message
#[derive(Debug, Clone, Copy)]
pub struct ContextReport {
    pub index: usize,
    pub outcome: KernelOutcome,
}

/// What came back from a group of contexts
#[derive(Debug, Default, Clone)]
pub struct Collection {
    pub reports: Vec<ContextReport>,
    /// Contexts that could not be created
    pub failed_to_start: usize,
    /// Contexts that ended without reporting
    pub crashed: usize,
    /// Contexts still running when the deadline passed
    pub timed_out: usize,
}

impl Collection {
    pub fn total_operations(&self) -> u64 {
        self.reports.iter().map(|r| r.outcome.operations).sum()
    }

    pub fn reported(&self) -> usize {
        self.reports.len()
    }
}

struct ContextHandle {
    index: usize,
    start: Sender<StartMessage>,
    cancel: Sender<()>,
    thread: JoinHandle<()>,
}

/// A set of spawned, not yet started, execution contexts
pub struct ContextGroup {
    contexts: Vec<ContextHandle>,
    results: Receiver<ContextReport>,
    failed_to_start: usize,
}

impl ContextGroup {
    /// Spawn `count` contexts, each waiting for its start message
    pub fn spawn(count: usize, workload: Arc<dyn Workload>) -> Self {
        let (result_tx, result_rx) = bounded::<ContextReport>(count.max(1));
        let mut contexts = Vec::with_capacity(count);
        let mut failed_to_start = 0;

        for index in 0..count {
            match spawn_context(index, Arc::clone(&workload), result_tx.clone()) {
                Ok(handle) => contexts.push(handle),
                Err(e) => {
                    log::warn!("[ContextGroup] {}", e);
                    failed_to_start += 1;
                }
            }
        }

        // Only the contexts hold senders now, so the channel disconnects once all have exited
        drop(result_tx);

        Self {
            contexts,
            results: result_rx,
            failed_to_start,
        }
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Send every context its start message, `stagger` apart
    pub fn start(&self, duration_ms: f64, stagger: Duration) {
        for (position, context) in self.contexts.iter().enumerate() {
            if position > 0 && !stagger.is_zero() {
                std::thread::sleep(stagger);
            }
            if context.start.send(StartMessage { duration_ms }).is_err() {
                log::warn!("[ContextGroup] Context {} exited before start", context.index);
            }
        }
    }

    /// Gather reports until every context has answered, all have exited, or `deadline` passes.
    ///
    /// Reported contexts are joined. Contexts still running at the deadline
    /// are sent a cancel message and detached: the workload stops at its next
    /// batch boundary and its late report goes nowhere once the receiver is
    /// dropped.
    pub fn collect(self, deadline: Instant) -> Collection {
        let expected = self.contexts.len();
        let mut reports = Vec::with_capacity(expected);
        let mut deadline_hit = false;

        while reports.len() < expected {
            match self.results.recv_deadline(deadline) {
                Ok(report) => reports.push(report),
                Err(RecvTimeoutError::Timeout) => {
                    deadline_hit = true;
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let mut collection = Collection {
            failed_to_start: self.failed_to_start,
            ..Default::default()
        };

        for context in self.contexts {
            let reported = reports.iter().any(|r: &ContextReport| r.index == context.index);
            drop(context.start);

            if reported || context.thread.is_finished() {
                if context.thread.join().is_err() {
                    log::warn!("[ContextGroup] Context {} panicked", context.index);
                }
                if !reported {
                    collection.crashed += 1;
                }
            } else if deadline_hit {
                log::warn!(
                    "[ContextGroup] Context {} did not report before the deadline, cancelling it",
                    context.index
                );
                let _ = context.cancel.try_send(());
                collection.timed_out += 1;
            } else {
                // Channel disconnected while this thread is still unwinding
                collection.crashed += 1;
            }
        }

        collection.reports = reports;
        collection
    }
}

fn spawn_context(
    index: usize,
    workload: Arc<dyn Workload>,
    results: Sender<ContextReport>,
) -> Result<ContextHandle, BenchError> {
    let (start_tx, start_rx) = bounded::<StartMessage>(1);
    let (cancel_tx, cancel_rx) = bounded::<()>(1);

    let thread = std::thread::Builder::new()
        .name(format!("titan-ctx-{}", index))
        .stack_size(CONTEXT_STACK_SIZE)
        .spawn(move || {
            let Ok(start) = start_rx.recv() else {
                return;
            };
            let stop = StopSignal::new(cancel_rx);
            let outcome = workload.execute(start.duration_ms, &stop);
            let outcome = KernelOutcome {
                checksum: std::hint::black_box(outcome.checksum),
                ..outcome
            };
            let _ = results.send(ContextReport { index, outcome });
        })
        .map_err(|error| BenchError::ContextSpawn { index, error })?;

    Ok(ContextHandle {
        index,
        start: start_tx,
        cancel: cancel_tx,
        thread,
    })
}
