//! Background worker standing in for a GPU queue.
//!
//! Jobs are submitted over a channel and executed in order on a dedicated
//! thread; each finished job reports back on a second channel.

use std::sync::mpsc::{Receiver, Sender};

/// Completion notice for one submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completed {
    /// Frame the job belonged to
    pub frame: u32,
}

/// A unit of queued work.
#[derive(Debug, Clone, Copy)]
pub struct Job<T> {
    pub frame: u32,
    pub payload: T,
}

/// Worker loop that executes jobs until the submission channel closes.
///
/// Receives jobs from `job_rx`, calls `execute` for each, and sends a
/// `Completed` notice via `done_tx`. Exits when all senders are dropped.
pub fn worker_loop<T>(
    job_rx: Receiver<Job<T>>,
    done_tx: Sender<Completed>,
    execute: impl Fn(&T),
) {
    while let Ok(job) = job_rx.recv() {
        execute(&job.payload);
        // Ignore send errors (engine may have been dropped)
        let _ = done_tx.send(Completed { frame: job.frame });
    }
}
