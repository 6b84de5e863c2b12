//! Pathfinding over the road network.
//!
//! Three algorithms behind one entry point, [`find_route`]. All of them honor
//! the same contract: blocked edges (infinite effective cost) are excluded
//! from traversal, equal-cost candidates are resolved by deterministic
//! tie-breaks (frontier ties by ascending node id, neighbor expansion in
//! adjacency insertion order, Bellman-Ford relaxation in ascending edge-id
//! order), and an unreachable destination is a normal [`PathResult`] outcome,
//! never an error.

pub mod astar;
pub mod bellman_ford;
pub mod dijkstra;
mod state;

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{Edge, RoadNetwork};
use crate::{EdgeId, Error, NodeId};

/// Algorithm selector. A closed set; dispatch is an explicit match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "bellman-ford")]
    BellmanFord,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::BellmanFord => "bellman-ford",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" => Ok(Algorithm::AStar),
            "bellman-ford" => Ok(Algorithm::BellmanFord),
            other => Err(Error::InvalidData(format!("unknown algorithm: {other}"))),
        }
    }
}

/// Result of a single routing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node ids from start to end inclusive; empty when no path exists.
    pub path: Vec<NodeId>,
    /// Sum of traversed edges' physical distance, in kilometres.
    pub total_distance_km: f64,
    /// Sum of traversed edges' free-flow duration, in minutes.
    pub estimated_time_min: f64,
    /// Nodes in the order the algorithm finalized them. Algorithm-specific;
    /// kept for visualization and debugging.
    pub visited_nodes: Vec<NodeId>,
    pub algorithm: Algorithm,
    /// Concatenated edge polylines, when the traversed edges carry geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
}

impl PathResult {
    /// Whether the query reached the destination. The empty path is the
    /// explicit no-path signal; it is an expected outcome, not an error.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    pub(crate) fn not_found(algorithm: Algorithm, visited_nodes: Vec<NodeId>) -> Self {
        PathResult {
            path: Vec::new(),
            total_distance_km: 0.0,
            estimated_time_min: 0.0,
            visited_nodes,
            algorithm,
            polyline: None,
        }
    }

    fn trivial(node: &str, algorithm: Algorithm) -> Self {
        PathResult {
            path: vec![node.to_owned()],
            total_distance_km: 0.0,
            estimated_time_min: 0.0,
            visited_nodes: vec![node.to_owned()],
            algorithm,
            polyline: None,
        }
    }
}

/// Runs one routing query against the current network state.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if either endpoint id is absent, and
/// [`Error::NegativeCycle`] if Bellman-Ford's integrity pass trips. An
/// unreachable destination is reported through the result, not as an error.
pub fn find_route(
    network: &RoadNetwork,
    start: &str,
    end: &str,
    algorithm: Algorithm,
) -> Result<PathResult, Error> {
    if !network.contains_node(start) {
        return Err(Error::UnknownNode(start.to_owned()));
    }
    if !network.contains_node(end) {
        return Err(Error::UnknownNode(end.to_owned()));
    }
    if start == end {
        return Ok(PathResult::trivial(start, algorithm));
    }
    match algorithm {
        Algorithm::Dijkstra => dijkstra::shortest_path(network, start, end),
        Algorithm::AStar => astar::shortest_path(network, start, end),
        Algorithm::BellmanFord => bellman_ford::shortest_path(network, start, end),
    }
}

/// One query per (origin, destination) pair, origins computed in parallel.
/// Queries are independent and read-only, so they share the network freely.
///
/// # Errors
///
/// Fails on the first unknown endpoint id, like [`find_route`].
pub fn route_matrix(
    network: &RoadNetwork,
    origins: &[NodeId],
    destinations: &[NodeId],
    algorithm: Algorithm,
) -> Result<Vec<Vec<PathResult>>, Error> {
    origins
        .par_iter()
        .map(|origin| {
            destinations
                .iter()
                .map(|destination| find_route(network, origin, destination, algorithm))
                .collect()
        })
        .collect()
}

/// Rebuilds the start-to-end path from per-node predecessor edges and sums
/// the traversed edges' physical attributes. Shared by all three algorithms.
fn assemble(
    network: &RoadNetwork,
    start: &str,
    end: &str,
    predecessors: &HashMap<NodeId, EdgeId>,
    visited_nodes: Vec<NodeId>,
    algorithm: Algorithm,
) -> PathResult {
    let mut path = vec![end.to_owned()];
    let mut edges_taken: Vec<&Edge> = Vec::new();
    let mut current = end;
    while current != start {
        // Predecessor ids are recorded straight off the network's own edges,
        // so resolution cannot fail on an unmodified graph; the guard keeps
        // reconstruction total.
        let Some(edge) = predecessors.get(current).and_then(|id| network.edge(id)) else {
            return PathResult::not_found(algorithm, visited_nodes);
        };
        edges_taken.push(edge);
        path.push(edge.from.clone());
        current = &edge.from;
    }
    path.reverse();
    edges_taken.reverse();

    let total_distance_km = edges_taken.iter().map(|e| e.distance_km).sum();
    let estimated_time_min = edges_taken.iter().map(|e| e.duration_min).sum();
    let segments: Vec<&str> = edges_taken
        .iter()
        .filter_map(|e| e.polyline.as_deref())
        .collect();
    let polyline = if segments.is_empty() {
        None
    } else {
        Some(segments.concat())
    };

    PathResult {
        path,
        total_distance_km,
        estimated_time_min,
        visited_nodes,
        algorithm,
        polyline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_tags_round_trip() {
        for (algorithm, tag) in [
            (Algorithm::Dijkstra, "dijkstra"),
            (Algorithm::AStar, "astar"),
            (Algorithm::BellmanFord, "bellman-ford"),
        ] {
            assert_eq!(algorithm.to_string(), tag);
            assert_eq!(tag.parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(
                serde_json::to_string(&algorithm).unwrap(),
                format!("\"{tag}\"")
            );
        }
        assert!("a-star".parse::<Algorithm>().is_err());
    }

    #[test]
    fn not_found_result_is_explicit() {
        let result = PathResult::not_found(Algorithm::Dijkstra, vec!["a".into()]);
        assert!(!result.is_found());
        assert_eq!(result.total_distance_km, 0.0);
        assert_eq!(result.visited_nodes, ["a"]);
    }
}
