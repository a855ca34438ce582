//! Bounded worker pool with an explicit join barrier.
//!
//! Jobs are submitted with [`WorkerPool::submit`] and run on a dedicated
//! rayon thread pool. [`WorkerPool::drain`] blocks until every submitted job
//! has finished and is the only synchronization point: the tree never spawns
//! threads on its own.
//!
//! # Usage
//!
//! ```ignore
//! let mut pool = WorkerPool::new(4)?;
//!
//! for cell in cells {
//!     pool.submit(move || build_subtree(cell));
//! }
//!
//! // Blocks; re-raises the first job error or panic.
//! let completions = pool.drain()?;
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crossbeam_channel::{Receiver, Sender};
use web_time::Instant;

use crate::error::{ConfigurationError, Result, SpaceTreeError};

/// Identifier of a submitted job, increasing in submission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(u64);

impl JobId {
  /// Raw id value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

/// Finished job output.
#[derive(Debug)]
pub struct JobCompletion<T> {
  /// Job this completion corresponds to.
  pub id: JobId,
  /// Value returned by the job.
  pub output: T,
  /// Wall time spent inside the job in microseconds.
  pub elapsed_us: u64,
}

type Outcome<T> = (JobId, std::thread::Result<Result<T>>, u64);

/// Fixed-size pool executing independent jobs that produce `T`.
pub struct WorkerPool<T> {
  pool: rayon::ThreadPool,
  sender: Sender<Outcome<T>>,
  receiver: Receiver<Outcome<T>>,
  in_flight: usize,
  next_id: u64,
}

impl<T: Send + 'static> WorkerPool<T> {
  /// Create a pool with `num_threads` workers (0 = rayon default).
  pub fn new(num_threads: usize) -> Result<Self> {
    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(num_threads)
      .thread_name(|i| format!("space-tree-worker-{}", i))
      .build()
      .map_err(|e| ConfigurationError::ThreadPool(e.to_string()))?;
    let (sender, receiver) = crossbeam_channel::unbounded();

    Ok(Self {
      pool,
      sender,
      receiver,
      in_flight: 0,
      next_id: 0,
    })
  }

  /// Enqueue a job (non-blocking).
  pub fn submit<F>(&mut self, job: F) -> JobId
  where
    F: FnOnce() -> Result<T> + Send + 'static,
  {
    let id = JobId(self.next_id);
    self.next_id += 1;
    self.in_flight += 1;

    let sender = self.sender.clone();
    self.pool.spawn(move || {
      let start = Instant::now();
      let outcome = panic::catch_unwind(AssertUnwindSafe(job));
      let elapsed_us = start.elapsed().as_micros() as u64;
      // Only fails if the pool was dropped without draining.
      let _ = sender.send((id, outcome, elapsed_us));
    });

    id
  }

  /// Block until every submitted job has finished.
  ///
  /// Completions are returned in submission order. If any job failed, all
  /// outputs are discarded and the error of the earliest failed job is
  /// returned: its own error when it returned `Err`, or
  /// [`SpaceTreeError::JobFailed`] when it panicked.
  pub fn drain(&mut self) -> Result<Vec<JobCompletion<T>>> {
    let mut completions = Vec::with_capacity(self.in_flight);
    let mut failure: Option<(JobId, SpaceTreeError)> = None;

    while self.in_flight > 0 {
      let (id, outcome, elapsed_us) =
        self
          .receiver
          .recv()
          .map_err(|_| SpaceTreeError::JobFailed {
            job: self.next_id,
            message: "completion channel closed".to_string(),
          })?;
      self.in_flight -= 1;

      let error = match outcome {
        Ok(Ok(output)) => {
          completions.push(JobCompletion {
            id,
            output,
            elapsed_us,
          });
          continue;
        }
        Ok(Err(err)) => err,
        Err(payload) => SpaceTreeError::JobFailed {
          job: id.0,
          message: panic_message(payload.as_ref()),
        },
      };

      tracing::warn!(job = id.0, error = %error, "worker job failed");
      if failure.as_ref().map_or(true, |(first, _)| id < *first) {
        failure = Some((id, error));
      }
    }

    if let Some((_, error)) = failure {
      return Err(error);
    }

    completions.sort_by_key(|c| c.id);
    tracing::debug!(jobs = completions.len(), "worker pool drained");
    Ok(completions)
  }

  /// Number of jobs submitted but not yet drained.
  pub fn pending_count(&self) -> usize {
    self.in_flight
  }

  /// True when no submitted job awaits draining.
  pub fn is_idle(&self) -> bool {
    self.in_flight == 0
  }

  /// Number of worker threads.
  pub fn num_threads(&self) -> usize {
    self.pool.current_num_threads()
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    (*message).to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "job panicked with a non-string payload".to_string()
  }
}

#[cfg(test)]
#[path = "threading_test.rs"]
mod threading_test;
