//! Bellman-Ford relaxation over the full edge set.
//!
//! Reads `current_weight` live on every pass, which tolerates traffic
//! adjustments that a frontier-based search would have baked into its queue.
//! The weight policy never produces negative costs, so the final integrity
//! pass is a defensive check rather than an expected code path.

use hashbrown::HashMap;
use log::warn;

use super::{Algorithm, PathResult, assemble};
use crate::model::RoadNetwork;
use crate::{EdgeId, Error, NodeId};

pub(super) fn shortest_path(
    network: &RoadNetwork,
    start: &str,
    end: &str,
) -> Result<PathResult, Error> {
    // Ascending-id relaxation order, for deterministic tie-breaks.
    let mut edge_ids: Vec<&EdgeId> = network.edge_ids().iter().collect();
    edge_ids.sort_unstable();

    let mut distances: HashMap<NodeId, f64> = HashMap::with_capacity(network.node_count());
    let mut predecessors: HashMap<NodeId, EdgeId> = HashMap::new();
    // Relaxation sequence number per node; reports the order in which each
    // node was *last* improved.
    let mut last_relaxed: HashMap<NodeId, usize> = HashMap::new();
    let mut sequence = 0usize;

    distances.insert(start.to_owned(), 0.0);

    for _pass in 1..network.node_count() {
        let mut changed = false;
        for edge_id in &edge_ids {
            let Some(edge) = network.edge(edge_id) else {
                continue;
            };
            let weight = edge.current_weight;
            if !weight.is_finite() {
                continue; // blocked
            }
            let Some(&from_cost) = distances.get(&edge.from) else {
                continue;
            };
            let candidate = from_cost + weight;
            let improved = match distances.get(&edge.to) {
                None => true,
                Some(&current) => candidate < current,
            };
            if improved {
                distances.insert(edge.to.clone(), candidate);
                predecessors.insert(edge.to.clone(), edge.id.clone());
                sequence += 1;
                last_relaxed.insert(edge.to.clone(), sequence);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // Integrity pass: any further improvement means a negative-weight cycle.
    for edge_id in &edge_ids {
        let Some(edge) = network.edge(edge_id) else {
            continue;
        };
        if !edge.current_weight.is_finite() {
            continue;
        }
        let Some(&from_cost) = distances.get(&edge.from) else {
            continue;
        };
        let candidate = from_cost + edge.current_weight;
        if distances
            .get(&edge.to)
            .is_some_and(|&current| candidate < current)
        {
            warn!("negative-weight cycle through edge {}", edge.id);
            return Err(Error::NegativeCycle);
        }
    }

    let mut relaxed: Vec<(usize, NodeId)> = last_relaxed
        .into_iter()
        .map(|(node, seq)| (seq, node))
        .collect();
    relaxed.sort_unstable();
    let visited_nodes: Vec<NodeId> = relaxed.into_iter().map(|(_, node)| node).collect();

    if !distances.contains_key(end) {
        return Ok(PathResult::not_found(Algorithm::BellmanFord, visited_nodes));
    }
    Ok(assemble(
        network,
        start,
        end,
        &predecessors,
        visited_nodes,
        Algorithm::BellmanFord,
    ))
}
