//! Submission worker pool: decouples callers from store and process I/O.
//!
//! Shape matches the original dispatcher: a standing core of workers, growth
//! without an upper bound when all workers are busy, 30-minute idle expiry
//! for the extras, and an unbounded handoff queue. "Caller runs" is the
//! fallback when the queue is gone (pool dropped mid-submission); it is a
//! shutdown-race safety net, not backpressure, since the queue never fills.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::utils::config::PoolConsts;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Pool tuning. Defaults come from [`PoolConsts`]; tests shrink the expiry.
#[derive(Clone, Copy, Debug)]
pub struct PoolSettings {
    /// Standing workers that never expire.
    pub min_workers: usize,
    /// Idle time after which an extra worker exits.
    pub idle_expiry: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_workers: PoolConsts::MIN_WORKERS,
            idle_expiry: PoolConsts::IDLE_EXPIRY,
        }
    }
}

/// Worker pool running persistence + notifier dispatch off the caller's
/// thread. Lives for the process's duration; dropping it closes the queue
/// and lets workers drain and exit.
pub struct SubmissionExecutor {
    tx: Sender<Job>,
    rx: Receiver<Job>,
    idle: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    pending: Arc<AtomicUsize>,
    settings: PoolSettings,
}

impl SubmissionExecutor {
    pub fn new() -> Self {
        Self::with_settings(PoolSettings::default())
    }

    pub fn with_settings(settings: PoolSettings) -> Self {
        let (tx, rx) = unbounded::<Job>();
        let pool = Self {
            tx,
            rx,
            idle: Arc::new(AtomicUsize::new(0)),
            live: Arc::new(AtomicUsize::new(0)),
            pending: Arc::new(AtomicUsize::new(0)),
            settings,
        };
        for _ in 0..settings.min_workers {
            pool.spawn_worker(None);
        }
        pool
    }

    /// Hand `job` to the pool. Never blocks: if every worker is busy an extra
    /// one is spawned first, and if the queue is already gone the job runs on
    /// the calling thread.
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.idle.load(Ordering::SeqCst) == 0 {
            self.spawn_worker(Some(self.settings.idle_expiry));
        }
        if let Err(err) = self.tx.send(Box::new(job)) {
            run_on_caller(err.into_inner(), &self.pending);
        }
    }

    /// Workers currently alive (core + extras).
    pub fn live_workers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Jobs handed off but not yet finished.
    pub fn pending_tasks(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Wait until every handed-off job has finished, up to `timeout`.
    /// Returns false on timeout. Submission itself never needs this; the CLI
    /// and tests use it to drain before exiting.
    pub fn flush(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending.load(Ordering::SeqCst) > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
        true
    }

    /// Spawn one worker. `expiry: None` marks a core worker that only exits
    /// when the queue disconnects; `Some(d)` marks an extra that also exits
    /// after sitting idle for `d`.
    fn spawn_worker(&self, expiry: Option<Duration>) {
        let rx = self.rx.clone();
        let idle = Arc::clone(&self.idle);
        let live = Arc::clone(&self.live);
        let pending = Arc::clone(&self.pending);
        live.fetch_add(1, Ordering::SeqCst);
        thread::spawn(move || {
            worker_loop(rx, idle, &pending, expiry);
            live.fetch_sub(1, Ordering::SeqCst);
        });
    }
}

impl Default for SubmissionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue gone (pool dropped mid-submission): run the job on the calling
/// thread so it is never lost, and settle its pending count.
fn run_on_caller(job: Job, pending: &AtomicUsize) {
    debug!("queue closed; running submission on the caller's thread");
    job();
    pending.fetch_sub(1, Ordering::SeqCst);
}

fn worker_loop(
    rx: Receiver<Job>,
    idle: Arc<AtomicUsize>,
    pending: &AtomicUsize,
    expiry: Option<Duration>,
) {
    loop {
        idle.fetch_add(1, Ordering::SeqCst);
        let job = match expiry {
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            Some(d) => rx.recv_timeout(d),
        };
        idle.fetch_sub(1, Ordering::SeqCst);
        match job {
            Ok(job) => {
                job();
                pending.fetch_sub(1, Ordering::SeqCst);
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!("idle worker expired");
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The hand-off path when the queue is already disconnected: the job
    /// runs on the calling thread and the pending count settles to zero.
    #[test]
    fn test_caller_runs_when_queue_disconnected() {
        let (tx, rx) = unbounded::<Job>();
        drop(rx);

        let pending = AtomicUsize::new(1);
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        let job: Job = Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let err = tx.send(job).unwrap_err();
        run_on_caller(err.into_inner(), &pending);

        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(pending.load(Ordering::SeqCst), 0);
    }
}
