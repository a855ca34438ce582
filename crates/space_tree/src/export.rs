//! Text serialization of a built tree.
//!
//! # CSV layout
//!
//! ```text
//! length,center0,..,center(N-1),value0,..,value(K-1)
//! <edge>,<cx>,..,<v0>,..          one row per node, depth-first pre-order
//! ```
//!
//! `K` is the sampler's point count. Floats use the shortest representation
//! that parses back to the same value.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PreconditionError, Result};
use crate::tree::SpaceTree;

/// Write every node of `tree` as one CSV row.
///
/// Fails with `NotEvaluated` if any node has no values; rows already
/// written stay in `writer`.
#[tracing::instrument(skip_all, fields(dimension = N))]
pub fn write_space_tree<const N: usize, W: Write>(tree: &SpaceTree<N>, mut writer: W) -> Result<()> {
  let sample_count = tree.context().sample_count();

  let mut header = String::from("length");
  for axis in 0..N {
    header.push_str(&format!(",center{}", axis));
  }
  for index in 0..sample_count {
    header.push_str(&format!(",value{}", index));
  }
  writeln!(writer, "{}", header)?;

  let mut rows = Vec::with_capacity(tree.node_count());
  tree.visit(|id, node| rows.push((id, node)));

  for (id, node) in &rows {
    let values = node
      .values()
      .ok_or(PreconditionError::NotEvaluated(id.index()))?;
    write!(writer, "{}", node.edge_length())?;
    for c in node.center() {
      write!(writer, ",{}", c)?;
    }
    for v in values {
      write!(writer, ",{}", v)?;
    }
    writeln!(writer)?;
  }
  writer.flush()?;

  tracing::debug!(rows = rows.len(), "space tree written as csv");
  Ok(())
}

/// [`write_space_tree`] into a new file at `path`.
pub fn save_space_tree<const N: usize>(tree: &SpaceTree<N>, path: impl AsRef<Path>) -> Result<()> {
  let file = File::create(path.as_ref())?;
  write_space_tree(tree, BufWriter::new(file))
}

/// Legacy ASCII VTK point cloud of leaf centers with a `fill_ratio` scalar.
///
/// Placeholder output for quick inspection in ParaView: only the first three
/// axes are written (missing axes are 0) and cells are not reconstructed.
pub fn write_vtk<const N: usize, W: Write>(tree: &SpaceTree<N>, mut writer: W) -> Result<()> {
  let mut leaves = Vec::new();
  tree.visit_leaves(|id, node| leaves.push((id, node)));

  let mut ratios = Vec::with_capacity(leaves.len());
  for (id, node) in &leaves {
    ratios.push(
      node
        .fill_ratio()
        .ok_or(PreconditionError::NotEvaluated(id.index()))?,
    );
  }

  writeln!(writer, "# vtk DataFile Version 3.0")?;
  writeln!(writer, "space tree leaves")?;
  writeln!(writer, "ASCII")?;
  writeln!(writer, "DATASET POLYDATA")?;
  writeln!(writer, "POINTS {} double", leaves.len())?;
  for (_, node) in &leaves {
    let center = node.center();
    let xyz: [f64; 3] = std::array::from_fn(|axis| center.get(axis).copied().unwrap_or(0.0));
    writeln!(writer, "{} {} {}", xyz[0], xyz[1], xyz[2])?;
  }
  writeln!(writer, "VERTICES {} {}", leaves.len(), leaves.len() * 2)?;
  for index in 0..leaves.len() {
    writeln!(writer, "1 {}", index)?;
  }
  writeln!(writer, "POINT_DATA {}", leaves.len())?;
  writeln!(writer, "SCALARS fill_ratio double 1")?;
  writeln!(writer, "LOOKUP_TABLE default")?;
  for ratio in ratios {
    writeln!(writer, "{}", ratio)?;
  }
  writer.flush()?;
  Ok(())
}

/// [`write_vtk`] into a new file at `path`.
pub fn save_vtk<const N: usize>(tree: &SpaceTree<N>, path: impl AsRef<Path>) -> Result<()> {
  let file = File::create(path.as_ref())?;
  write_vtk(tree, BufWriter::new(file))
}

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;
