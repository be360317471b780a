use std::mem::size_of;

use crate::error::{GraphError, Result};

/// Node identifier: a row index in `[0, node_count)`.
pub type NodeId = u32;

/// Per-edge value. Every edge currently carries [`UNIT_WEIGHT`].
pub type Weight = u32;

/// The weight stored for every edge of an unweighted graph.
pub const UNIT_WEIGHT: Weight = 1;

/// Read-only directed graph in Compressed Sparse Row layout.
///
/// Node `i`'s out-neighbors are `col_indices[row_ptr[i]..row_ptr[i + 1]]`,
/// sorted ascending, duplicates kept. `values` runs parallel to
/// `col_indices` so the layout carries over to weighted graphs.
///
/// Built once by [`CsrBuilder`](crate::CsrBuilder); there is no way to add or
/// remove edges afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    num_nodes: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<NodeId>,
    values: Vec<Weight>,
}

impl CsrGraph {
    /// Empty store: zero nodes, zero edges.
    pub fn new() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        row_ptr: Vec<usize>,
        col_indices: Vec<NodeId>,
        values: Vec<Weight>,
    ) -> Self {
        debug_assert!(!row_ptr.is_empty());
        Self {
            num_nodes: row_ptr.len() - 1,
            row_ptr,
            col_indices,
            values,
        }
    }

    pub fn node_count(&self) -> usize {
        self.num_nodes
    }

    pub fn edge_count(&self) -> usize {
        self.col_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Whether `node` has a row in this graph.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        (node as usize) < self.num_nodes
    }

    /// Out-degree of `node`; 0 when `node` is out of range.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        if !self.contains(node) {
            return 0;
        }
        let i = node as usize;
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    /// Out-neighbors of `node` in ascending order; empty when out of range.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        if !self.contains(node) {
            return &[];
        }
        let i = node as usize;
        &self.col_indices[self.row_ptr[i]..self.row_ptr[i + 1]]
    }

    /// Weights parallel to [`neighbors`](Self::neighbors).
    pub fn edge_weights(&self, node: NodeId) -> &[Weight] {
        if !self.contains(node) {
            return &[];
        }
        let i = node as usize;
        &self.values[self.row_ptr[i]..self.row_ptr[i + 1]]
    }

    /// All node ids, ascending.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.num_nodes).map(|i| i as NodeId)
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_indices(&self) -> &[NodeId] {
        &self.col_indices
    }

    pub fn values(&self) -> &[Weight] {
        &self.values
    }

    /// Bytes held by the three CSR arrays.
    pub fn memory_usage(&self) -> usize {
        self.row_ptr.len() * size_of::<usize>()
            + self.col_indices.len() * size_of::<NodeId>()
            + self.values.len() * size_of::<Weight>()
    }

    /// Check every structural invariant, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.row_ptr.len() != self.num_nodes + 1 {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr length {} != node_count + 1 = {}",
                self.row_ptr.len(),
                self.num_nodes + 1
            )));
        }
        if self.row_ptr[0] != 0 {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr[0] = {}, expected 0",
                self.row_ptr[0]
            )));
        }
        if let Some(i) = self.row_ptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr decreases at index {}",
                i
            )));
        }
        let last = self.row_ptr[self.num_nodes];
        if last != self.col_indices.len() {
            return Err(GraphError::InvalidCsr(format!(
                "row_ptr[{}] = {} != edge_count {}",
                self.num_nodes,
                last,
                self.col_indices.len()
            )));
        }
        if self.values.len() != self.col_indices.len() {
            return Err(GraphError::InvalidCsr(format!(
                "values length {} != edge_count {}",
                self.values.len(),
                self.col_indices.len()
            )));
        }
        if let Some(&w) = self.values.iter().find(|&&w| w != UNIT_WEIGHT) {
            return Err(GraphError::InvalidCsr(format!("non-unit edge weight {}", w)));
        }
        if let Some(&col) = self.col_indices.iter().find(|&&c| !self.contains(c)) {
            return Err(GraphError::InvalidCsr(format!(
                "col index {} >= node_count {}",
                col, self.num_nodes
            )));
        }
        for node in self.nodes() {
            if self.neighbors(node).windows(2).any(|w| w[0] > w[1]) {
                return Err(GraphError::InvalidCsr(format!(
                    "neighbors of node {} not sorted",
                    node
                )));
            }
        }
        Ok(())
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> CsrGraph {
        CsrGraph::from_edges(vec![(0, 1), (1, 2), (0, 2)])
    }

    #[test]
    fn test_empty_store() {
        let g = CsrGraph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert_eq!(g.row_ptr(), &[0]);
        assert_eq!(g.degree(0), 0);
        assert!(g.neighbors(0).is_empty());
        assert_eq!(g.nodes().count(), 0);
        g.validate().unwrap();
    }

    #[test]
    fn test_triangle_accessors() {
        let g = triangle();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(1), 1);
        assert_eq!(g.degree(2), 0);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert_eq!(g.neighbors(1), &[2]);
        assert!(g.neighbors(2).is_empty());
        assert_eq!(g.row_ptr(), &[0, 2, 3, 3]);
        assert_eq!(g.values(), &[1, 1, 1]);
        assert_eq!(g.edge_weights(0), &[UNIT_WEIGHT, UNIT_WEIGHT]);
    }

    #[test]
    fn test_out_of_range_defaults() {
        let g = triangle();
        assert!(!g.contains(3));
        assert_eq!(g.degree(3), 0);
        assert_eq!(g.degree(NodeId::MAX), 0);
        assert!(g.neighbors(99).is_empty());
        assert!(g.edge_weights(99).is_empty());
    }

    #[test]
    fn test_neighbors_restartable() {
        let g = triangle();
        let first: Vec<_> = g.neighbors(0).iter().copied().collect();
        let second: Vec<_> = g.neighbors(0).iter().copied().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_memory_usage() {
        let g = triangle();
        let expected = 4 * size_of::<usize>() + 3 * size_of::<NodeId>() + 3 * size_of::<Weight>();
        assert_eq!(g.memory_usage(), expected);
    }

    #[test]
    fn test_validate_detects_decreasing_row_ptr() {
        let g = CsrGraph::from_parts(vec![0, 2, 1, 2], vec![1, 2], vec![1, 1]);
        let err = g.validate().unwrap_err();
        assert!(err.to_string().contains("decreases"));
    }

    #[test]
    fn test_validate_detects_unsorted_row() {
        let g = CsrGraph::from_parts(vec![0, 2, 2, 2], vec![2, 1], vec![1, 1]);
        let err = g.validate().unwrap_err();
        assert!(err.to_string().contains("not sorted"));
    }

    #[test]
    fn test_validate_detects_col_out_of_range() {
        let g = CsrGraph::from_parts(vec![0, 1, 1], vec![5], vec![1]);
        let err = g.validate().unwrap_err();
        assert!(err.to_string().contains("col index 5"));
    }

    #[test]
    fn test_validate_detects_bad_tail() {
        let g = CsrGraph::from_parts(vec![0, 1, 1], vec![1, 0], vec![1, 1]);
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_validate_detects_weight_mismatch() {
        let g = CsrGraph::from_parts(vec![0, 1, 1], vec![1], vec![]);
        assert!(g.validate().is_err());
        let g = CsrGraph::from_parts(vec![0, 1, 1], vec![1], vec![3]);
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_graph_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CsrGraph>();
    }
}
