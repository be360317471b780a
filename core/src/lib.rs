//! neuronet-core: Compressed-Sparse-Row graph store and bounded traversal.
//!
//! Loads a directed, unweighted graph from a plain-text edge list, compacts
//! it into CSR arrays, and answers degree, neighbor and depth-bounded BFS
//! queries against it. Sized for graphs with millions of nodes and edges
//! held entirely in memory, loaded once and queried many times.
//!
//! Diagnostics go through `tracing`; the embedding program installs
//! whatever subscriber it wants. This crate prints nothing.

mod builder;
mod engine;
mod error;
mod graph;
mod parser;
mod traversal;

pub use builder::{estimate_build_bytes, CsrBuilder};
pub use engine::{
    to_node_id, CsrEngine, GraphBackend, LoadOptions, LoadReport, DEFAULT_MAX_MEMORY_MB,
};
pub use error::{GraphError, Result};
pub use graph::{CsrGraph, NodeId, Weight, UNIT_WEIGHT};
pub use parser::{parse_edge_file, parse_edge_list, EdgeList};
pub use traversal::{
    bfs, bfs_neighborhood, degree_ranking, extract_subgraph, induced_edges, max_degree_node,
    DegreeResult, SubgraphEdge, SubgraphResult, TraversalResult, VisitedNode,
};
