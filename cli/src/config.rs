use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use neuronet_core::{LoadOptions, DEFAULT_MAX_MEMORY_MB};

use crate::util::OutputFormat;

/// Smallest and largest accepted memory budgets (MB).
pub const MIN_MEMORY_MB: u32 = 64;
pub const MAX_MEMORY_MB: u32 = 131_072; // 128 GB

/// Options shared by every subcommand. Flags win over environment
/// variables, which win over defaults.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Edge-list file to load
    #[arg(short, long, global = true, env = "NEURONET_GRAPH")]
    pub graph: Option<PathBuf>,

    /// Peak memory allowed while building the graph (MB)
    #[arg(
        long,
        global = true,
        env = "NEURONET_MAX_MEMORY_MB",
        default_value_t = DEFAULT_MAX_MEMORY_MB as u32,
        value_parser = clap::value_parser!(u32).range(MIN_MEMORY_MB as i64..=MAX_MEMORY_MB as i64)
    )]
    pub max_memory_mb: u32,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug diagnostics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub graph: PathBuf,
    pub load_options: LoadOptions,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let graph = args
            .graph
            .clone()
            .ok_or_else(|| anyhow!("no graph file given: pass --graph or set NEURONET_GRAPH"))?;

        Ok(Self {
            graph,
            load_options: LoadOptions::with_max_memory_mb(args.max_memory_mb as usize),
            format: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        })
    }
}
