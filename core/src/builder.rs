//! Two-phase CSR construction: sort the edge list, then compact it into
//! `row_ptr` / `col_indices` / `values` in a single pass.

use std::mem::size_of;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{CsrGraph, NodeId, Weight, UNIT_WEIGHT};
use crate::parser::EdgeList;

/// Collects directed edges for a fixed node count and compacts them into a
/// [`CsrGraph`].
///
/// Duplicate `(src, dst)` pairs are kept; each one becomes its own entry in
/// the source's neighbor slice.
#[derive(Debug, Clone)]
pub struct CsrBuilder {
    num_nodes: usize,
    edges: Vec<(NodeId, NodeId)>,
}

impl CsrBuilder {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
        }
    }

    /// Take ownership of an already collected edge list.
    pub fn with_edges(mut self, edges: Vec<(NodeId, NodeId)>) -> Self {
        if self.edges.is_empty() {
            self.edges = edges;
        } else {
            self.edges.extend(edges);
        }
        self
    }

    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) -> &mut Self {
        self.edges.push((src, dst));
        self
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Sort and compact. Fails if any endpoint is outside `[0, num_nodes)`.
    pub fn build(self) -> Result<CsrGraph> {
        if let Some(&(src, dst)) = self
            .edges
            .iter()
            .find(|&&(src, dst)| src as usize >= self.num_nodes || dst as usize >= self.num_nodes)
        {
            let node = if src as usize >= self.num_nodes { src } else { dst };
            return Err(GraphError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes,
            });
        }
        Ok(compact(self.num_nodes, self.edges))
    }
}

impl CsrGraph {
    /// Build from raw edges, sizing the graph as `max id + 1`.
    ///
    /// With no edges this yields a single isolated node 0, the same shape a
    /// comment-only edge list loads to.
    pub fn from_edges(edges: Vec<(NodeId, NodeId)>) -> Self {
        let max_id = edges
            .iter()
            .map(|&(src, dst)| src.max(dst))
            .max()
            .unwrap_or(0);
        compact(max_id as usize + 1, edges)
    }

    /// Build from a parsed edge list, one row per id up to `max_id`.
    pub fn from_edge_list(list: EdgeList) -> Result<Self> {
        CsrBuilder::new(list.num_nodes())
            .with_edges(list.edges)
            .build()
    }
}

/// Peak bytes resident while building: the edge list plus all three CSR
/// arrays exist at the same time.
pub fn estimate_build_bytes(num_nodes: usize, num_edges: usize) -> usize {
    let edge_list = num_edges.saturating_mul(size_of::<(NodeId, NodeId)>());
    let row_ptr = num_nodes.saturating_add(1).saturating_mul(size_of::<usize>());
    let columns = num_edges.saturating_mul(size_of::<NodeId>() + size_of::<Weight>());
    edge_list.saturating_add(row_ptr).saturating_add(columns)
}

/// Every endpoint must already be `< num_nodes`.
fn compact(num_nodes: usize, mut edges: Vec<(NodeId, NodeId)>) -> CsrGraph {
    // Lexicographic (src, dst): rows become contiguous and each row ascending.
    edges.sort_unstable();

    let num_edges = edges.len();
    let mut row_ptr = vec![0usize; num_nodes + 1];
    let mut col_indices: Vec<NodeId> = Vec::with_capacity(num_edges);
    let mut values: Vec<Weight> = Vec::with_capacity(num_edges);

    let mut current_row = 0usize;
    let mut edge_count = 0usize;

    for (src, dst) in edges {
        // Close every row up to src, including empty ones.
        while current_row < src as usize {
            current_row += 1;
            row_ptr[current_row] = edge_count;
        }
        col_indices.push(dst);
        values.push(UNIT_WEIGHT);
        edge_count += 1;
    }

    while current_row < num_nodes {
        current_row += 1;
        row_ptr[current_row] = edge_count;
    }

    debug!(num_nodes, num_edges, "compacted edge list into CSR");
    CsrGraph::from_parts(row_ptr, col_indices, values)
}
