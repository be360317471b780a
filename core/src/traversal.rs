use std::collections::{HashSet, VecDeque};

use crate::graph::{CsrGraph, NodeId};

/// A node reached by a bounded BFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitedNode {
    pub node_id: NodeId,
    /// Hops from the start node.
    pub distance: u32,
}

/// Nodes in discovery order, start node first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalResult {
    pub nodes: Vec<VisitedNode>,
}

impl TraversalResult {
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.node_id).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest distance reached, `None` when nothing was visited.
    pub fn max_distance(&self) -> Option<u32> {
        self.nodes.iter().map(|n| n.distance).max()
    }
}

/// One stored edge whose endpoints both lie in a node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubgraphEdge {
    pub from_id: NodeId,
    pub to_id: NodeId,
}

/// Result of subgraph extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubgraphResult {
    pub node_count: usize,
    pub edges: Vec<SubgraphEdge>,
}

/// Out-degree of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub degree: usize,
}

/// BFS neighborhood: every node reachable from `start` within `max_depth`
/// hops, in discovery order, each tagged with its distance.
///
/// The start node comes first at distance 0. A node dequeued at
/// `max_depth` is reported but not expanded. Rows are expanded in
/// ascending neighbor order and the queue is strict FIFO, so the output is
/// fully determined by the graph and the arguments.
///
/// Returns an empty result when `start` is out of range.
pub fn bfs_neighborhood(graph: &CsrGraph, start: NodeId, max_depth: u32) -> TraversalResult {
    if !graph.contains(start) {
        return TraversalResult::default();
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();
    let mut nodes = Vec::new();

    visited.insert(start);
    queue.push_back((start, 0));
    nodes.push(VisitedNode {
        node_id: start,
        distance: 0,
    });

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for &next in graph.neighbors(current) {
            if visited.insert(next) {
                nodes.push(VisitedNode {
                    node_id: next,
                    distance: depth + 1,
                });
                queue.push_back((next, depth + 1));
            }
        }
    }

    TraversalResult { nodes }
}

/// Bounded BFS returning node ids only, in discovery order.
pub fn bfs(graph: &CsrGraph, start: NodeId, max_depth: u32) -> Vec<NodeId> {
    bfs_neighborhood(graph, start, max_depth).node_ids()
}

/// Edges of `graph` with both endpoints in `nodes`.
///
/// Sources follow the order of `nodes` (repeats ignored), targets ascend
/// within each source, and parallel edges are kept. Out-of-range ids
/// contribute nothing.
pub fn induced_edges(graph: &CsrGraph, nodes: &[NodeId]) -> Vec<SubgraphEdge> {
    let node_set: HashSet<NodeId> = nodes.iter().copied().collect();
    let mut emitted: HashSet<NodeId> = HashSet::with_capacity(node_set.len());
    let mut edges = Vec::new();

    for &from_id in nodes {
        if !emitted.insert(from_id) {
            continue;
        }
        for &to_id in graph.neighbors(from_id) {
            if node_set.contains(&to_id) {
                edges.push(SubgraphEdge { from_id, to_id });
            }
        }
    }

    edges
}

/// The subgraph reachable from `start` within `max_depth` hops: the BFS
/// node set plus every stored edge between those nodes.
pub fn extract_subgraph(graph: &CsrGraph, start: NodeId, max_depth: u32) -> SubgraphResult {
    let nodes = bfs(graph, start, max_depth);
    let edges = induced_edges(graph, &nodes);
    SubgraphResult {
        node_count: nodes.len(),
        edges,
    }
}

/// Return nodes ranked by out-degree.
///
/// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
/// degree (descending). Ties are broken by node ID (ascending).
pub fn degree_ranking(graph: &CsrGraph, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = graph
        .nodes()
        .map(|node_id| DegreeResult {
            node_id,
            degree: graph.degree(node_id),
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.node_id.cmp(&b.node_id)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}

/// The node with the highest out-degree (lowest id on ties).
pub fn max_degree_node(graph: &CsrGraph) -> Option<DegreeResult> {
    graph
        .nodes()
        .map(|node_id| DegreeResult {
            node_id,
            degree: graph.degree(node_id),
        })
        .max_by(|a, b| a.degree.cmp(&b.degree).then(b.node_id.cmp(&a.node_id)))
}
