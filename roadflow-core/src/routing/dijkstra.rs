//! Dijkstra's algorithm over live effective weights.
//!
//! The weight policy keeps every traversable cost non-negative (blocked edges
//! are excluded entirely rather than priced), so the classic settle-in-cost-
//! order invariant holds. Terminates as soon as the destination is settled.

use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet, hash_map::Entry};

use super::state::State;
use super::{Algorithm, PathResult, assemble};
use crate::model::RoadNetwork;
use crate::{EdgeId, Error, NodeId};

pub(super) fn shortest_path(
    network: &RoadNetwork,
    start: &str,
    end: &str,
) -> Result<PathResult, Error> {
    let estimated_nodes = network.node_count().min(1000);
    let mut distances: HashMap<NodeId, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeId, EdgeId> = HashMap::with_capacity(estimated_nodes);
    let mut settled: HashSet<NodeId> = HashSet::with_capacity(estimated_nodes);
    let mut visited_nodes: Vec<NodeId> = Vec::new();
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    distances.insert(start.to_owned(), 0.0);
    heap.push(State {
        cost: 0.0,
        node: start.to_owned(),
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Stale frontier entry for an already-settled node
        if !settled.insert(node.clone()) {
            continue;
        }
        visited_nodes.push(node.clone());

        if node == end {
            return Ok(assemble(
                network,
                start,
                end,
                &predecessors,
                visited_nodes,
                Algorithm::Dijkstra,
            ));
        }

        for edge in network.outgoing_edges(&node) {
            let weight = edge.current_weight;
            if !weight.is_finite() {
                continue; // blocked
            }
            let next_cost = cost + weight;
            match distances.entry(edge.to.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(edge.to.clone(), edge.id.clone());
                    heap.push(State {
                        cost: next_cost,
                        node: edge.to.clone(),
                    });
                }
                // Strictly-less update: the first-discovered predecessor wins
                // ties, keeping equal-cost paths deterministic.
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(edge.to.clone(), edge.id.clone());
                        heap.push(State {
                            cost: next_cost,
                            node: edge.to.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(PathResult::not_found(Algorithm::Dijkstra, visited_nodes))
}
