//! Kahn's topological sort with level tracking.

use strata_core::errors::OrderError;
use strata_core::{CausalOrder, PrecedenceMatrix};
use tracing::{debug, warn};

use crate::cycles;

/// Result of leveling a precedence matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResolution {
    /// Causal depth layers, each sorted ascending.
    pub levels: Vec<Vec<usize>>,
    /// Flattened levels; a topological order of the acyclic part.
    pub order: CausalOrder,
    /// Nodes never reached by the leveling, sorted ascending.
    pub cycle_nodes: Vec<usize>,
}

impl OrderResolution {
    /// True when every node was ordered.
    pub fn is_dag(&self) -> bool {
        self.cycle_nodes.is_empty()
    }

    /// Zero-based level of `node`, or `None` for cycle nodes.
    pub fn level_of(&self, node: usize) -> Option<usize> {
        self.levels.iter().position(|level| level.binary_search(&node).is_ok())
    }

    /// The complete order, or the unordered nodes if any remain.
    pub fn into_causal_order(self) -> Result<CausalOrder, OrderError> {
        if self.is_dag() {
            Ok(self.order)
        } else {
            Err(OrderError::CycleDetected {
                nodes: self.cycle_nodes,
            })
        }
    }

    /// Strongly connected components among the cycle nodes.
    pub fn cycle_components(&self, matrix: &PrecedenceMatrix) -> Vec<Vec<usize>> {
        cycles::cycle_components(matrix, &self.cycle_nodes)
    }

    /// Cycle nodes that sit downstream of a cycle without being on one.
    pub fn blocked_nodes(&self, matrix: &PrecedenceMatrix) -> Vec<usize> {
        let on_cycle: Vec<usize> = self.cycle_components(matrix).concat();
        self.cycle_nodes
            .iter()
            .copied()
            .filter(|node| !on_cycle.contains(node))
            .collect()
    }
}

/// Levels a precedence matrix into a causal order.
pub struct OrderResolver;

impl OrderResolver {
    /// Level `matrix` breadth-first.
    ///
    /// The queue is a single arena of node indices. `head` marks the next
    /// node to process and `frontier_end` the end of the current level, so
    /// nodes enqueued while a level is processed belong to the next one.
    pub fn resolve(matrix: &PrecedenceMatrix) -> OrderResolution {
        let n = matrix.dim();
        let mut in_degree: Vec<usize> = (0..n).map(|node| matrix.in_degree(node)).collect();

        let mut queue: Vec<usize> = Vec::with_capacity(n);
        queue.extend((0..n).filter(|&node| in_degree[node] == 0));

        let mut levels: Vec<Vec<usize>> = Vec::new();
        let mut head = 0;
        while head < queue.len() {
            let frontier_end = queue.len();
            queue[head..frontier_end].sort_unstable();
            levels.push(queue[head..frontier_end].to_vec());

            while head < frontier_end {
                let cause = queue[head];
                head += 1;
                for effect in matrix.effects_of(cause) {
                    in_degree[effect] -= 1;
                    if in_degree[effect] == 0 {
                        queue.push(effect);
                    }
                }
            }
            debug!(
                level = levels.len(),
                nodes = ?levels[levels.len() - 1],
                "resolved causal level"
            );
        }

        let mut cycle_nodes = Vec::new();
        if queue.len() < n {
            let mut ordered = vec![false; n];
            for &node in &queue {
                ordered[node] = true;
            }
            cycle_nodes.extend((0..n).filter(|&node| !ordered[node]));
            warn!(
                ordered = queue.len(),
                unordered = cycle_nodes.len(),
                nodes = ?cycle_nodes,
                "precedence matrix is not acyclic"
            );
        }

        OrderResolution {
            levels,
            order: CausalOrder::new(queue),
            cycle_nodes,
        }
    }
}

/// Free-function form of [`OrderResolver::resolve`].
pub fn resolve_causal_order(matrix: &PrecedenceMatrix) -> OrderResolution {
    OrderResolver::resolve(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(n: usize, edges: &[(usize, usize)]) -> PrecedenceMatrix {
        PrecedenceMatrix::from_edges(n, edges).unwrap()
    }

    #[test]
    fn chain_resolves_one_node_per_level() {
        let res = OrderResolver::resolve(&matrix(3, &[(0, 1), (1, 2)]));
        assert_eq!(res.levels, vec![vec![0], vec![1], vec![2]]);
        assert_eq!(res.order.as_slice(), &[0, 1, 2]);
        assert!(res.cycle_nodes.is_empty());
        assert!(res.is_dag());
    }

    #[test]
    fn frontier_is_sorted_even_when_discovered_out_of_order() {
        // 3 is discovered (via 0) before 1 (via 2), but both sit on level 1.
        let res = OrderResolver::resolve(&matrix(4, &[(0, 3), (2, 1)]));
        assert_eq!(res.levels, vec![vec![0, 2], vec![1, 3]]);
        assert_eq!(res.order.as_slice(), &[0, 2, 1, 3]);
    }

    #[test]
    fn diamond_waits_for_all_parents() {
        let res = OrderResolver::resolve(&matrix(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]));
        assert_eq!(res.levels, vec![vec![0], vec![1, 2], vec![3]]);
        assert_eq!(res.level_of(3), Some(2));
    }

    #[test]
    fn self_loops_are_ignored() {
        let m = PrecedenceMatrix::from_rows(&[[1, 0], [1, 1]]).unwrap();
        let res = OrderResolver::resolve(&m);
        assert_eq!(res.order.as_slice(), &[0, 1]);
        assert!(res.is_dag());
    }

    #[test]
    fn cycle_is_reported_not_raised() {
        let m = matrix(4, &[(0, 1), (1, 2), (2, 1), (2, 3)]);
        let res = OrderResolver::resolve(&m);
        assert_eq!(res.levels, vec![vec![0]]);
        assert_eq!(res.order.as_slice(), &[0]);
        assert_eq!(res.cycle_nodes, vec![1, 2, 3]);
        assert_eq!(res.level_of(1), None);
        assert_eq!(res.cycle_components(&m), vec![vec![1, 2]]);
        assert_eq!(res.blocked_nodes(&m), vec![3]);
        assert_eq!(
            res.into_causal_order(),
            Err(OrderError::CycleDetected {
                nodes: vec![1, 2, 3]
            })
        );
    }

    #[test]
    fn empty_matrix_has_no_levels() {
        let res = OrderResolver::resolve(&matrix(0, &[]));
        assert!(res.levels.is_empty());
        assert!(res.order.is_empty());
        assert!(res.is_dag());
    }
}
