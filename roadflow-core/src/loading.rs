//! JSON network ingestion.
//!
//! The network builder collaborator (geocoding / distance-matrix side)
//! supplies the initial node and edge collections; the engine only validates
//! and indexes them. Effective weights are always derived at build time, so
//! a stored snapshot cannot smuggle in stale traffic state.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::model::{Edge, Node, RoadNetwork, RoadType, TrafficLevel};
use crate::{EdgeId, Error, NodeId};

/// Static half of an edge, as supplied by the network builder.
/// `current_weight` is intentionally absent from the wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub distance_km: f64,
    pub duration_min: f64,
    pub road_type: RoadType,
    pub base_weight: f64,
    #[serde(default)]
    pub traffic_level: TrafficLevel,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
}

impl From<EdgeSpec> for Edge {
    fn from(spec: EdgeSpec) -> Self {
        Edge {
            id: spec.id,
            from: spec.from,
            to: spec.to,
            distance_km: spec.distance_km,
            duration_min: spec.duration_min,
            road_type: spec.road_type,
            base_weight: spec.base_weight,
            // placeholder; RoadNetwork::add_edge derives the real value
            current_weight: 0.0,
            is_blocked: spec.is_blocked,
            traffic_level: spec.traffic_level,
            polyline: spec.polyline,
        }
    }
}

/// Wire form of a whole network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkData {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeSpec>,
}

/// Builds an indexed network from raw collections.
///
/// # Errors
///
/// Returns the first id-collision, dangling-endpoint or invalid-attribute
/// error encountered; partial input is never silently dropped.
pub fn build_network(data: NetworkData) -> Result<RoadNetwork, Error> {
    let mut network = RoadNetwork::new();
    for node in data.nodes {
        network.add_node(node)?;
    }
    for spec in data.edges {
        network.add_edge(spec.into())?;
    }
    info!(
        "Built road network: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}

/// Reads a network from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_network(path: &Path) -> Result<RoadNetwork, Error> {
    let raw = fs::read_to_string(path)?;
    let data: NetworkData =
        serde_json::from_str(&raw).map_err(|e| Error::InvalidData(e.to_string()))?;
    build_network(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_json_and_derives_weights() {
        let raw = r#"{
            "nodes": [
                {"id": "a", "name": "A", "location": {"lat": 40.0, "lng": -75.0}, "type": "city"},
                {"id": "b", "name": "B", "location": {"lat": 40.1, "lng": -75.0}, "type": "junction"}
            ],
            "edges": [
                {"id": "e1", "from": "a", "to": "b", "distance_km": 11.1,
                 "duration_min": 9.0, "road_type": "highway", "base_weight": 9.0,
                 "traffic_level": "high"}
            ]
        }"#;
        let data: NetworkData = serde_json::from_str(raw).unwrap();
        let network = build_network(data).unwrap();
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edge_count(), 1);
        assert_eq!(network.edge("e1").unwrap().current_weight, 22.5);
    }

    #[test]
    fn dangling_endpoint_is_a_build_error() {
        let data = NetworkData {
            nodes: vec![],
            edges: vec![EdgeSpec {
                id: "e1".into(),
                from: "a".into(),
                to: "b".into(),
                distance_km: 1.0,
                duration_min: 1.0,
                road_type: RoadType::Street,
                base_weight: 1.0,
                traffic_level: TrafficLevel::Low,
                is_blocked: false,
                polyline: None,
            }],
        };
        assert!(matches!(
            build_network(data),
            Err(Error::UnknownNode(_))
        ));
    }
}
