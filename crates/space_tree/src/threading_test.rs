use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::error::{DegeneracyError, SpaceTreeError};

#[test]
fn test_submit_and_drain() {
  let mut pool = WorkerPool::new(2).unwrap();
  let id = pool.submit(|| Ok(42i32));
  assert_eq!(pool.pending_count(), 1);

  let completions = pool.drain().unwrap();
  assert_eq!(completions.len(), 1);
  assert_eq!(completions[0].id, id);
  assert_eq!(completions[0].output, 42);
  assert!(pool.is_idle());
}

/// Completions come back in submission order regardless of finish order.
#[test]
fn test_drain_preserves_submission_order() {
  let mut pool = WorkerPool::new(4).unwrap();
  let ids: Vec<JobId> = (0..16u64)
    .map(|i| {
      pool.submit(move || {
        // Later jobs finish first.
        std::thread::sleep(std::time::Duration::from_millis(16 - i));
        Ok(i * 2)
      })
    })
    .collect();

  let completions = pool.drain().unwrap();
  let outputs: Vec<u64> = completions.iter().map(|c| c.output).collect();
  assert_eq!(outputs, (0..16u64).map(|i| i * 2).collect::<Vec<_>>());
  assert_eq!(completions.iter().map(|c| c.id).collect::<Vec<_>>(), ids);
}

/// Drain waits for every job, not just the first.
#[test]
fn test_drain_is_a_barrier() {
  let counter = Arc::new(AtomicUsize::new(0));
  let mut pool = WorkerPool::new(3).unwrap();
  for _ in 0..32 {
    let counter = Arc::clone(&counter);
    pool.submit(move || {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok(())
    });
  }
  pool.drain().unwrap();
  assert_eq!(counter.load(Ordering::SeqCst), 32);
}

/// A job error is re-raised at drain time, not swallowed.
#[test]
fn test_job_error_is_reraised() {
  let mut pool = WorkerPool::<u32>::new(2).unwrap();
  pool.submit(|| Ok(1));
  pool.submit(|| Err(DegeneracyError::InvalidThreshold(-1.0).into()));
  pool.submit(|| Ok(3));

  let err = pool.drain().unwrap_err();
  assert!(matches!(
    err,
    SpaceTreeError::NumericDegeneracy(DegeneracyError::InvalidThreshold(_))
  ));
  // Every job was still accounted for.
  assert!(pool.is_idle());
}

#[test]
fn test_job_panic_is_captured() {
  let mut pool = WorkerPool::<u32>::new(1).unwrap();
  let id = pool.submit(|| panic!("boom"));

  match pool.drain() {
    Err(SpaceTreeError::JobFailed { job, message }) => {
      assert_eq!(job, id.raw());
      assert!(message.contains("boom"));
    }
    other => panic!("expected JobFailed, got {:?}", other.map(|c| c.len())),
  }

  // Pool stays usable after a failed batch.
  pool.submit(|| Ok(7));
  assert_eq!(pool.drain().unwrap()[0].output, 7);
}

#[test]
fn test_empty_drain() {
  let mut pool = WorkerPool::<()>::new(1).unwrap();
  assert!(pool.drain().unwrap().is_empty());
  assert_eq!(pool.num_threads(), 1);
}
