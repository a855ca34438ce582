//! Space classification driver.
//!
//! Builds an adaptive space tree around a preset target read from a TOML run
//! file and writes the result as CSV (plus an optional VTK point cloud), or
//! computes per-element fill ratios on a regular grid.
//!
//! Set `RUST_LOG=debug` for library events.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use space_tree::{
	boundary_nodes, build_parallel, element_fill_ratios, save_space_tree, save_vtk, CartesianGridSampler,
	MidpointGridSampler, Sampler, SpaceTree,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, FillConfig, Sampling};

/// Adaptive mixed-radix space classification.
#[derive(Parser, Debug)]
#[command(name = "classify_space")]
#[command(about = "Classifies space against implicit targets with an adaptive tree")]
struct Args {
	#[command(subcommand)]
	command: Command,

	/// Worker threads (overrides [tree].threads, 0 = one per core).
	#[arg(short, long, global = true)]
	threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Build the tree and dump every node.
	Classify {
		/// Path to run configuration TOML file.
		#[arg(short, long)]
		config: PathBuf,

		/// CSV output path.
		#[arg(short, long)]
		output: PathBuf,

		/// Optional VTK point cloud of leaf centers.
		#[arg(long)]
		vtk: Option<PathBuf>,
	},
	/// Compute fill ratios for the [fill] element grid.
	Fill {
		/// Path to run configuration TOML file.
		#[arg(short, long)]
		config: PathBuf,

		/// CSV output path.
		#[arg(short, long)]
		output: PathBuf,
	},
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	match &args.command {
		Command::Classify { config, output, vtk } => {
			classify(config, output, vtk.as_deref(), args.threads)
		}
		Command::Fill { config, output } => fill(config, output, args.threads),
	}
}

fn classify(config_path: &Path, output: &Path, vtk: Option<&Path>, threads: Option<usize>) -> Result<()> {
	log::info!("Loading config from: {}", config_path.display());
	let config = Config::load(config_path)?;

	let mut tree_config = config.tree.to_library();
	if let Some(threads) = threads {
		tree_config.threads = threads;
	}
	let ctx = tree_config.context::<3>().context("Building tree context")?;
	let root = config.domain.cell()?;
	let shape = config.target.build()?;

	log::info!(
		"Building tree: arity {}, max depth {}, {} samples per node",
		ctx.arity(),
		tree_config.max_depth,
		ctx.sample_count()
	);

	let mut tree = SpaceTree::new(root, ctx)?;
	if tree_config.threads == 1 {
		tree.build(&shape, tree_config.max_depth)?;
	} else {
		let mut pool = tree_config.worker_pool()?;
		log::debug!("Worker pool with {} threads", pool.num_threads());
		build_parallel(&mut tree, Arc::new(shape), tree_config.max_depth, &mut pool)?;
	}

	let stats = tree.stats();
	println!(
		"{} nodes ({} leaves, {} internal), depth {}",
		stats.node_count, stats.leaf_count, stats.internal_count, stats.max_depth
	);
	for (depth, count) in stats.leaves_per_depth.iter().enumerate() {
		if *count > 0 {
			println!("  depth {}: {} leaves", depth, count);
		}
	}
	println!("{} boundary leaves", boundary_nodes(&tree).len());

	save_space_tree(&tree, output).with_context(|| format!("Writing {}", output.display()))?;
	println!("  ✓ {}", output.display());

	if let Some(vtk) = vtk {
		save_vtk(&tree, vtk).with_context(|| format!("Writing {}", vtk.display()))?;
		println!("  ✓ {}", vtk.display());
	}

	Ok(())
}

fn fill(config_path: &Path, output: &Path, threads: Option<usize>) -> Result<()> {
	log::info!("Loading config from: {}", config_path.display());
	let config = Config::load(config_path)?;
	let Some(grid) = &config.fill else {
		anyhow::bail!("{} has no [fill] section", config_path.display());
	};

	log::info!(
		"Sampling {}x{}x{} elements",
		grid.divisions[0],
		grid.divisions[1],
		grid.divisions[2]
	);
	let ratios = fill_ratios(&config, grid, threads)?;

	let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
	let mut writer = BufWriter::new(file);
	writeln!(writer, "i,j,k,fill_ratio")?;
	let [_, ny, nz] = grid.divisions;
	for (index, ratio) in ratios.iter().enumerate() {
		writeln!(writer, "{},{},{},{}", index / (ny * nz), (index / nz) % ny, index % nz, ratio)?;
	}
	writer.flush()?;

	let full = ratios.iter().filter(|r| **r >= 1.0).count();
	let empty = ratios.iter().filter(|r| **r <= 0.0).count();
	println!(
		"{} elements: {} full, {} empty, {} partial",
		ratios.len(),
		full,
		empty,
		ratios.len() - full - empty
	);
	println!("  ✓ {}", output.display());
	Ok(())
}

/// Fill ratios of every [fill] element, on a pool of `threads` workers
/// (falling back to [tree].threads, 0 = rayon's global pool).
fn fill_ratios(config: &Config, grid: &FillConfig, threads: Option<usize>) -> Result<Vec<f64>> {
	let domain = config.domain.cell()?;
	let shape = config.target.build()?;
	let sampler: Box<dyn Sampler<3>> = match grid.sampling {
		Sampling::Cartesian => Box::new(CartesianGridSampler::new(grid.sampler_order)?),
		Sampling::Midpoint => Box::new(MidpointGridSampler::new(grid.sampler_order)?),
	};

	let threads = threads.unwrap_or(config.tree.threads);
	if threads == 0 {
		return Ok(element_fill_ratios(&shape, &domain, grid.divisions, sampler.as_ref())?);
	}
	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(threads)
		.build()
		.context("Building fill thread pool")?;
	log::debug!("Fill pool with {} threads", pool.current_num_threads());
	let ratios = pool.install(|| element_fill_ratios(&shape, &domain, grid.divisions, sampler.as_ref()))?;
	Ok(ratios)
}
