//! neuronet: load an edge list into a CSR graph and query it.
//!
//! Every subcommand loads the graph named by `--graph` (or
//! `NEURONET_GRAPH`) once, then answers the query. `shell` keeps the graph
//! resident and reads queries from stdin.

mod config;
mod degree;
mod load;
mod neighborhood;
mod shell;
mod status;
mod subgraph;
mod util;

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{GlobalArgs, Settings};

#[derive(Parser)]
#[command(name = "neuronet")]
#[command(author, version, about = "Query large directed graphs held in CSR form")]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Node and edge counts, memory and load time
    Stats,

    /// Nodes reachable from a start node within a hop limit
    Bfs {
        /// Start node
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        start: i64,

        /// Maximum number of hops
        #[arg(short, long, default_value_t = 2, allow_negative_numbers = true)]
        depth: i64,
    },

    /// Out-degree of one node
    Degree {
        #[arg(short, long, allow_negative_numbers = true)]
        node: i64,
    },

    /// Direct successors of one node
    Neighbors {
        #[arg(short, long, allow_negative_numbers = true)]
        node: i64,
    },

    /// Most connected nodes by out-degree
    Top {
        /// How many to list (0 = all)
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Bounded neighborhood of a node together with the edges among it
    Subgraph {
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        start: i64,

        #[arg(short, long, default_value_t = 2, allow_negative_numbers = true)]
        depth: i64,
    },

    /// Interactive query loop over stdin
    Shell,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_args(&cli.global)?;
    let engine = load::load_graph(&settings)?;
    let format = settings.format;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Stats => status::render(&engine, format, &mut out)?,
        Commands::Bfs { start, depth } => {
            neighborhood::render(&engine, start, depth, format, &mut out)?
        }
        Commands::Degree { node } => degree::render_degree(&engine, node, format, &mut out)?,
        Commands::Neighbors { node } => {
            degree::render_neighbors(&engine, node, format, &mut out)?
        }
        Commands::Top { count } => degree::render_top(&engine, count, format, &mut out)?,
        Commands::Subgraph { start, depth } => {
            subgraph::render(&engine, start, depth, format, &mut out)?
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            shell::run(&engine, format, stdin.lock(), &mut out, prompt)?
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.global.verbose, cli.global.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
