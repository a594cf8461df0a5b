//! Synthetic replay engine.
//!
//! Simulates a capture of `frames` frames. Each frame costs `decode_time`
//! on the calling thread and queues `gpu_time` of work on a background
//! worker, so the engine really does have in-flight work that
//! `wait_until_idle` must drain.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::worker::{worker_loop, Completed, Job};
use super::{ErrorState, ReplayEngine};

/// Shape of the simulated workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticConfig {
    /// Number of frames in the simulated capture
    pub frames: u32,
    /// CPU time spent decoding each frame
    pub decode_time: Duration,
    /// Time the background queue spends on each frame
    pub gpu_time: Duration,
    /// Frames allowed in flight before `process_next_frame` blocks
    pub max_frames_in_flight: usize,
    /// Simulate a decode failure when this frame is reached
    pub fail_at_frame: Option<u32>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            decode_time: Duration::from_millis(2),
            gpu_time: Duration::from_millis(4),
            max_frames_in_flight: 2,
            fail_at_frame: None,
        }
    }
}

pub struct SyntheticEngine {
    config: SyntheticConfig,
    current_frame: u32,
    error_state: ErrorState,
    in_flight: usize,
    job_tx: Option<Sender<Job<Duration>>>,
    done_rx: Receiver<Completed>,
    worker: Option<JoinHandle<()>>,
}

impl SyntheticEngine {
    pub fn new(config: SyntheticConfig) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job<Duration>>();
        let (done_tx, done_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("synthetic-gpu".to_string())
            .spawn(move || worker_loop(job_rx, done_tx, |cost| spend(*cost)));

        let (job_tx, worker) = match worker {
            Ok(handle) => (Some(job_tx), Some(handle)),
            Err(e) => {
                // Fall back to running queued work inline.
                tracing::warn!("Failed to spawn synthetic GPU worker, work runs inline: {}", e);
                (None, None)
            }
        };

        Self {
            config,
            current_frame: 0,
            error_state: ErrorState::None,
            in_flight: 0,
            job_tx,
            done_rx,
            worker,
        }
    }

    /// Frames submitted to the worker that have not completed yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn submit(&mut self, frame: u32) {
        let cost = self.config.gpu_time;
        let sent = match &self.job_tx {
            Some(tx) => tx.send(Job { frame, payload: cost }).is_ok(),
            None => false,
        };
        if sent {
            self.in_flight += 1;
        } else {
            spend(cost);
        }
    }

    /// Collect completions without blocking.
    fn reap(&mut self) {
        loop {
            match self.done_rx.try_recv() {
                Ok(_) => self.in_flight = self.in_flight.saturating_sub(1),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.in_flight = 0;
                    break;
                }
            }
        }
    }

    /// Block until one queued frame completes.
    fn wait_for_one(&mut self) {
        match self.done_rx.recv() {
            Ok(done) => {
                tracing::trace!("Synthetic GPU finished frame {}", done.frame);
                self.in_flight = self.in_flight.saturating_sub(1);
            }
            Err(_) => {
                tracing::warn!("Synthetic GPU worker exited with {} frame(s) in flight", self.in_flight);
                self.in_flight = 0;
            }
        }
    }
}

impl ReplayEngine for SyntheticEngine {
    fn process_next_frame(&mut self) -> bool {
        if self.error_state.is_error() {
            return false;
        }

        if self.config.fail_at_frame == Some(self.current_frame) {
            tracing::error!("Failed to decode frame {}", self.current_frame);
            self.error_state = ErrorState::Error;
            return false;
        }

        if self.current_frame >= self.config.frames {
            tracing::debug!("Reached end of capture after {} frames", self.current_frame);
            return false;
        }

        self.reap();
        while self.in_flight >= self.config.max_frames_in_flight.max(1) {
            self.wait_for_one();
        }

        spend(self.config.decode_time);
        self.submit(self.current_frame);
        self.current_frame += 1;
        true
    }

    fn current_frame_number(&self) -> u32 {
        self.current_frame
    }

    fn error_state(&self) -> ErrorState {
        self.error_state
    }

    fn wait_until_idle(&mut self) {
        while self.in_flight > 0 {
            self.wait_for_one();
        }
    }
}

impl Drop for SyntheticEngine {
    fn drop(&mut self) {
        // Closing the channel lets the worker loop exit.
        self.job_tx = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("Synthetic GPU worker panicked");
            }
        }
    }
}

fn spend(cost: Duration) {
    if !cost.is_zero() {
        thread::sleep(cost);
    }
}
