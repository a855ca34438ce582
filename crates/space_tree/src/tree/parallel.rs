//! Parallel division: one worker job per child of the divided node.
//!
//! Each job builds a detached subtree for its child cell. After the pool is
//! drained the subtrees are grafted back in slot order, so the resulting
//! arena layout does not depend on the order in which jobs finished.

use std::sync::Arc;

use super::arena::SpaceTree;
use super::node::NodeId;
use crate::csg::Target;
use crate::error::{PreconditionError, Result, SpaceTreeError};
use crate::threading::WorkerPool;

/// Divide `id` like [`SpaceTree::divide`], building each child's subtree on
/// `pool`.
///
/// The pool must be idle, since draining it is what joins the children.
/// Produces the same tree as the sequential divide. On any job failure the
/// node is left an undivided leaf and the earliest failure is returned.
pub fn divide_parallel<const N: usize, T>(
  tree: &mut SpaceTree<N>,
  id: NodeId,
  target: Arc<T>,
  max_depth: usize,
  pool: &mut WorkerPool<SpaceTree<N>>,
) -> Result<()>
where
  T: Target<N> + Send + 'static,
{
  if !pool.is_idle() {
    return Err(PreconditionError::PoolBusy(pool.pending_count()).into());
  }

  let points = tree.points_for_divide(id)?;
  if !tree.wants_split(id, &points, max_depth)? {
    return Ok(());
  }

  let children = tree.split(id)?;
  let mut slots = Vec::with_capacity(children.len());
  for child in children.map(NodeId) {
    let node = &tree.nodes[child.0];
    let (cell, depth) = (node.cell, node.depth);
    let ctx = Arc::clone(&tree.ctx);
    let target = Arc::clone(&target);
    let job = pool.submit(move || {
      let mut sub = SpaceTree::with_root_depth(cell, depth, ctx)?;
      sub.build(target.as_ref(), max_depth)?;
      Ok(sub)
    });
    slots.push((job, child));
  }

  let completions = match pool.drain() {
    Ok(completions) => completions,
    Err(err) => {
      tree.collapse(id);
      return Err(err);
    }
  };

  let busy_us: u64 = completions.iter().map(|c| c.elapsed_us).sum();
  for (completion, (job, slot)) in completions.into_iter().zip(slots) {
    let grafted = if completion.id == job {
      tree.graft(slot, completion.output)
    } else {
      Err(SpaceTreeError::JobFailed {
        job: completion.id.raw(),
        message: format!("completion does not belong to child slot {}", slot.0),
      })
    };
    if let Err(err) = grafted {
      tree.collapse(id);
      return Err(err);
    }
  }

  tracing::debug!(
    node = id.0,
    nodes = tree.nodes.len(),
    busy_us,
    threads = pool.num_threads(),
    "parallel divide finished"
  );
  Ok(())
}

/// Evaluate the root, then [`divide_parallel`] it.
pub fn build_parallel<const N: usize, T>(
  tree: &mut SpaceTree<N>,
  target: Arc<T>,
  max_depth: usize,
  pool: &mut WorkerPool<SpaceTree<N>>,
) -> Result<()>
where
  T: Target<N> + Send + 'static,
{
  tree.evaluate(NodeId::ROOT, target.as_ref())?;
  divide_parallel(tree, NodeId::ROOT, target, max_depth, pool)
}

#[cfg(test)]
#[path = "parallel_test.rs"]
mod parallel_test;
