use std::cmp::Ordering;

use crate::NodeId;

/// Frontier entry for the heap-based searches.
#[derive(Debug, Clone)]
pub(super) struct State {
    pub(super) cost: f64,
    pub(super) node: NodeId,
}

// Min-heap by cost (reversed from standard Rust BinaryHeap); equal costs
// fall back to ascending node id so frontier pops are deterministic.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn pops_cheapest_first_then_lowest_id() {
        let mut heap = BinaryHeap::new();
        for (cost, node) in [(2.0, "b"), (1.0, "d"), (1.0, "c"), (3.0, "a")] {
            heap.push(State {
                cost,
                node: node.to_owned(),
            });
        }
        let order: Vec<NodeId> = std::iter::from_fn(|| heap.pop().map(|s| s.node)).collect();
        assert_eq!(order, ["c", "d", "b", "a"]);
    }
}
