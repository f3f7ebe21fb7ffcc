//! Did-change delivery
//!
//! Will-change is always posted synchronously on the mutating thread.
//! Did-change is either posted the same way or handed to a [`MainQueue`]
//! that a single designated thread drains with [`MainQueueRunner`].
//!
//! The queue is a plain `flume` channel of boxed jobs. Enqueuing never
//! blocks; the store mutation has already happened by the time a queued
//! did-change runs.

use tracing::warn;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// How a binding posts its did-change signal
#[derive(Clone, Default)]
pub enum DidChangeDelivery {
    /// Post on the mutating thread before `set` returns
    #[default]
    Immediate,
    /// Post from whichever thread drains the queue
    Queued(MainQueue),
}

impl std::fmt::Debug for DidChangeDelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DidChangeDelivery::Immediate => f.write_str("Immediate"),
            DidChangeDelivery::Queued(_) => f.write_str("Queued"),
        }
    }
}

/// Create a linked queue handle and runner
///
/// ```
/// use prefstore_binding::main_queue;
///
/// let (queue, runner) = main_queue();
/// queue.enqueue(|| println!("on the main thread"));
/// assert_eq!(runner.run_pending(), 1);
/// ```
pub fn main_queue() -> (MainQueue, MainQueueRunner) {
    let (tx, rx) = flume::unbounded();
    (MainQueue { tx }, MainQueueRunner { rx })
}

/// Sending half of the main queue; cheap to clone
#[derive(Clone)]
pub struct MainQueue {
    tx: flume::Sender<Job>,
}

impl MainQueue {
    /// Schedule `job` on the runner's thread
    ///
    /// Returns `false` if the runner is gone; the job is dropped.
    pub fn enqueue<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        match self.tx.send(Box::new(job)) {
            Ok(()) => true,
            Err(_) => {
                warn!("Main queue runner dropped; discarding job");
                false
            }
        }
    }
}

impl std::fmt::Debug for MainQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainQueue")
            .field("pending", &self.tx.len())
            .finish()
    }
}

/// Receiving half of the main queue
pub struct MainQueueRunner {
    rx: flume::Receiver<Job>,
}

impl MainQueueRunner {
    /// Run every job that is ready, without waiting
    ///
    /// Jobs enqueued by a running job are picked up in the same call.
    /// Returns the number of jobs run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Run jobs until every [`MainQueue`] handle has been dropped
    pub fn run(self) {
        for job in self.rx.iter() {
            job();
        }
    }

    /// Jobs waiting to run
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl std::fmt::Debug for MainQueueRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainQueueRunner")
            .field("pending", &self.pending())
            .finish()
    }
}
