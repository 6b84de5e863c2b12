//! A* search with a haversine lower-bound heuristic.
//!
//! Base weights are an abstract cost, not a fixed unit, so the heuristic
//! scales great-circle distance by the cheapest observed cost-per-kilometre
//! across traversable edges. Any remaining path covers at least the
//! great-circle distance and pays at least that rate per kilometre, which
//! keeps the estimate admissible and consistent. On a network with no
//! finite-cost edge the rate collapses to zero and the search degrades to
//! Dijkstra.

use std::collections::BinaryHeap;

use geo::{Distance, Haversine};
use hashbrown::{HashMap, HashSet, hash_map::Entry};

use super::state::State;
use super::{Algorithm, PathResult, assemble};
use crate::model::{Node, RoadNetwork};
use crate::{EdgeId, Error, NodeId};

/// Cheapest cost-per-kilometre among traversable edges; the heuristic's
/// admissibility scale. Computed once per query.
fn min_cost_per_km(network: &RoadNetwork) -> f64 {
    let rate = network
        .edges()
        .filter(|e| e.current_weight.is_finite() && e.distance_km > 0.0)
        .map(|e| e.current_weight / e.distance_km)
        .fold(f64::INFINITY, f64::min);
    if rate.is_finite() { rate } else { 0.0 }
}

fn heuristic(node: &Node, goal: &Node, rate_per_km: f64) -> f64 {
    Haversine.distance(node.location, goal.location) / 1000.0 * rate_per_km
}

pub(super) fn shortest_path(
    network: &RoadNetwork,
    start: &str,
    end: &str,
) -> Result<PathResult, Error> {
    let goal = network
        .node(end)
        .ok_or_else(|| Error::UnknownNode(end.to_owned()))?;
    let rate_per_km = min_cost_per_km(network);

    let estimated_nodes = network.node_count().min(1000);
    // Accumulated cost from the start; frontier priority adds the heuristic.
    let mut g_scores: HashMap<NodeId, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeId, EdgeId> = HashMap::with_capacity(estimated_nodes);
    let mut expanded: HashSet<NodeId> = HashSet::with_capacity(estimated_nodes);
    let mut visited_nodes: Vec<NodeId> = Vec::new();
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    g_scores.insert(start.to_owned(), 0.0);
    if let Some(origin) = network.node(start) {
        heap.push(State {
            cost: heuristic(origin, goal, rate_per_km),
            node: start.to_owned(),
        });
    }

    while let Some(State { node, .. }) = heap.pop() {
        if !expanded.insert(node.clone()) {
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
                Algorithm::AStar,
            ));
        }

        let Some(&g_node) = g_scores.get(&node) else {
            continue;
        };

        for edge in network.outgoing_edges(&node) {
            let weight = edge.current_weight;
            if !weight.is_finite() {
                continue; // blocked
            }
            let Some(next) = network.node(&edge.to) else {
                continue;
            };
            let tentative = g_node + weight;
            let improved = match g_scores.entry(edge.to.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(tentative);
                    true
                }
                Entry::Occupied(mut entry) => {
                    if tentative < *entry.get() {
                        *entry.get_mut() = tentative;
                        true
                    } else {
                        false
                    }
                }
            };
            if improved {
                predecessors.insert(edge.to.clone(), edge.id.clone());
                heap.push(State {
                    cost: tentative + heuristic(next, goal, rate_per_km),
                    node: edge.to.clone(),
                });
            }
        }
    }

    Ok(PathResult::not_found(Algorithm::AStar, visited_nodes))
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::model::{Edge, Node, NodeKind, RoadType, TrafficLevel};

    fn node(id: &str, lat: f64, lng: f64) -> Node {
        Node {
            id: id.to_owned(),
            name: id.to_owned(),
            location: Point::new(lng, lat),
            address: None,
            place_id: None,
            kind: NodeKind::Junction,
        }
    }

    fn edge(id: &str, from: &str, to: &str, distance_km: f64, base_weight: f64) -> Edge {
        Edge {
            id: id.to_owned(),
            from: from.to_owned(),
            to: to.to_owned(),
            distance_km,
            duration_min: distance_km,
            road_type: RoadType::Street,
            base_weight,
            current_weight: 0.0,
            is_blocked: false,
            traffic_level: TrafficLevel::Low,
            polyline: None,
        }
    }

    #[test]
    fn heuristic_rate_tracks_the_cheapest_traversable_edge() {
        let mut network = RoadNetwork::new();
        network.add_node(node("a", 40.0, -75.0)).unwrap();
        network.add_node(node("b", 40.01, -75.0)).unwrap();
        network.add_edge(edge("e1", "a", "b", 2.0, 6.0)).unwrap();
        network.add_edge(edge("e2", "b", "a", 2.0, 2.0)).unwrap();
        assert_eq!(min_cost_per_km(&network), 1.0);

        // Blocking the cheap edge removes it from the scale.
        network.set_blocked("e2", true).unwrap();
        assert_eq!(min_cost_per_km(&network), 3.0);

        network.set_blocked("e1", true).unwrap();
        assert_eq!(min_cost_per_km(&network), 0.0);
    }

    #[test]
    fn heuristic_is_zero_at_the_goal() {
        let goal = node("g", 40.0, -75.0);
        assert_eq!(heuristic(&goal, &goal, 2.5), 0.0);
    }
}
