//! Cycle analysis over the nodes the leveling could not order.
//! Uses Tarjan's SCC on the residual subgraph.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use strata_core::PrecedenceMatrix;

/// Strongly connected components with more than one node among `residual`.
///
/// Each component is sorted ascending; components are ordered by their
/// smallest member. The diagonal is zero, so single nodes never form a cycle.
pub fn cycle_components(matrix: &PrecedenceMatrix, residual: &[usize]) -> Vec<Vec<usize>> {
    if residual.len() < 2 {
        return Vec::new();
    }

    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(residual.len(), 0);
    let indices: Vec<NodeIndex> = residual.iter().map(|&node| graph.add_node(node)).collect();
    for (a, &cause) in residual.iter().enumerate() {
        for (b, &effect) in residual.iter().enumerate() {
            if matrix.has_edge(cause, effect) {
                graph.add_edge(indices[a], indices[b], ());
            }
        }
    }

    let mut components: Vec<Vec<usize>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut nodes: Vec<usize> = scc.into_iter().map(|idx| graph[idx]).collect();
            nodes.sort_unstable();
            nodes
        })
        .collect();
    components.sort_unstable_by_key(|nodes| nodes[0]);
    components
}
