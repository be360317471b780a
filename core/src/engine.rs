use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::builder::estimate_build_bytes;
use crate::error::{GraphError, Result};
use crate::graph::{CsrGraph, NodeId};
use crate::parser::{self, EdgeList};
use crate::traversal;

/// Default memory budget for a load, in megabytes.
pub const DEFAULT_MAX_MEMORY_MB: usize = 4096;

const BYTES_PER_MB: usize = 1024 * 1024;

/// Capabilities every graph representation offers to callers.
///
/// Node ids are signed at this boundary: negative or too-large ids are
/// simply out of range and get the defined defaults (`0`, empty).
pub trait GraphBackend {
    /// Populate the store from an edge-list file. Succeeds at most once.
    fn load(&mut self, path: &Path) -> Result<LoadReport>;

    /// Node ids reachable from `start` within `max_depth` hops, in BFS
    /// discovery order, `start` first.
    fn bfs(&self, start: i64, max_depth: u32) -> Vec<NodeId>;

    fn degree(&self, node: i64) -> usize;

    fn neighbors(&self, node: i64) -> &[NodeId];

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}

/// Limits applied while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Peak bytes allowed during the build; `None` disables the check.
    pub max_memory_bytes: Option<usize>,
}

impl LoadOptions {
    pub fn unlimited() -> Self {
        Self {
            max_memory_bytes: None,
        }
    }

    pub fn with_max_memory_mb(mb: usize) -> Self {
        Self {
            max_memory_bytes: Some(mb.saturating_mul(BYTES_PER_MB)),
        }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::with_max_memory_mb(DEFAULT_MAX_MEMORY_MB)
    }
}

/// What a successful load produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: PathBuf,
    pub node_count: usize,
    pub edge_count: usize,
    pub max_id: NodeId,
    pub malformed_lines: usize,
    pub skipped_lines: usize,
    /// Bytes held by the built CSR arrays.
    pub memory_bytes: usize,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn memory_mb(&self) -> f64 {
        self.memory_bytes as f64 / BYTES_PER_MB as f64
    }
}

/// CSR-backed engine: empty until one successful load, read-only after.
#[derive(Debug, Default)]
pub struct CsrEngine {
    options: LoadOptions,
    graph: CsrGraph,
    report: Option<LoadReport>,
}

impl CsrEngine {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            graph: CsrGraph::new(),
            report: None,
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn graph(&self) -> &CsrGraph {
        &self.graph
    }

    /// Report of the load that populated the store, if any.
    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.report.is_some()
    }

    /// Load from an already open reader; `source` names it in the report.
    pub fn load_reader<R: BufRead>(
        &mut self,
        reader: R,
        source: impl Into<PathBuf>,
    ) -> Result<LoadReport> {
        let source = source.into();
        self.ensure_empty()?;
        info!(source = %source.display(), "loading edge list");

        let started = Instant::now();
        let list = parser::parse_edge_list(reader).map_err(|e| {
            error!(source = %source.display(), error = %e, "read failed, store left empty");
            GraphError::from(e)
        })?;
        self.install(list, source, started)
    }

    /// Depth-annotated BFS over the loaded graph.
    pub fn bfs_neighborhood(&self, start: i64, max_depth: u32) -> traversal::TraversalResult {
        match to_node_id(start) {
            Some(start) => traversal::bfs_neighborhood(&self.graph, start, max_depth),
            None => traversal::TraversalResult::default(),
        }
    }

    fn ensure_empty(&self) -> Result<()> {
        match &self.report {
            Some(report) => Err(GraphError::AlreadyLoaded(report.source.clone())),
            None => Ok(()),
        }
    }

    fn install(&mut self, list: EdgeList, source: PathBuf, started: Instant) -> Result<LoadReport> {
        let num_nodes = list.num_nodes();
        let num_edges = list.len();
        info!(
            max_id = list.max_id,
            edges = num_edges,
            malformed = list.malformed_lines,
            "parsed edge list"
        );

        let required_bytes = estimate_build_bytes(num_nodes, num_edges);
        if let Some(limit_bytes) = self.options.max_memory_bytes {
            if required_bytes > limit_bytes {
                let err = GraphError::MemoryLimitExceeded {
                    required_bytes,
                    limit_bytes,
                };
                warn!(source = %source.display(), "{}", err);
                return Err(err);
            }
        }

        let max_id = list.max_id;
        let malformed_lines = list.malformed_lines;
        let skipped_lines = list.skipped_lines;
        let graph = CsrGraph::from_edge_list(list)?;

        let report = LoadReport {
            source,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            max_id,
            malformed_lines,
            skipped_lines,
            memory_bytes: graph.memory_usage(),
            elapsed: started.elapsed(),
        };
        info!(
            nodes = report.node_count,
            edges = report.edge_count,
            memory_mb = %format!("{:.2}", report.memory_mb()),
            elapsed_ms = %format!("{:.1}", report.elapsed.as_secs_f64() * 1000.0),
            "CSR structure built"
        );

        self.graph = graph;
        self.report = Some(report.clone());
        Ok(report)
    }
}

impl GraphBackend for CsrEngine {
    fn load(&mut self, path: &Path) -> Result<LoadReport> {
        self.ensure_empty()?;
        info!(path = %path.display(), "loading edge list");

        let started = Instant::now();
        let list = parser::parse_edge_file(path).inspect_err(|e| {
            // Unopenable sources are already reported by the parser.
            if let GraphError::Io(io) = e {
                error!(path = %path.display(), error = %io, "read failed, store left empty");
            }
        })?;
        self.install(list, path.to_path_buf(), started)
    }

    fn bfs(&self, start: i64, max_depth: u32) -> Vec<NodeId> {
        self.bfs_neighborhood(start, max_depth).node_ids()
    }

    fn degree(&self, node: i64) -> usize {
        to_node_id(node).map_or(0, |n| self.graph.degree(n))
    }

    fn neighbors(&self, node: i64) -> &[NodeId] {
        match to_node_id(node) {
            Some(n) => self.graph.neighbors(n),
            None => &[],
        }
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Signed id from a caller; `None` means out of range for any graph.
pub fn to_node_id(raw: i64) -> Option<NodeId> {
    NodeId::try_from(raw).ok()
}
