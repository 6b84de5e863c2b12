//! Road network components - nodes, edges, and traffic state

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{EdgeId, NodeId};

/// Classification of a node. Display-only; never affects traversal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    City,
    Landmark,
    Junction,
}

/// Road class of an edge. Display-only; cost differences are expressed
/// through `base_weight`, not through this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadType {
    Highway,
    Street,
    Alley,
}

/// Live congestion level of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    /// Cost multiplier applied to an edge's base weight.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            TrafficLevel::Low => 1.0,
            TrafficLevel::Medium => 1.5,
            TrafficLevel::High => 2.5,
        }
    }
}

/// Graph node: a routable place on the map.
///
/// Identity and location are fixed at build time and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// WGS84 coordinates
    #[serde(with = "latlng")]
    pub location: Point<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// External geocoder reference, if the node came from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Serialized as `type`; collaborators know this field under that name.
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Directed road segment. An undirected road is represented as two edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    /// Physical length in kilometres.
    pub distance_km: f64,
    /// Free-flow travel time in minutes.
    pub duration_min: f64,
    pub road_type: RoadType,
    /// Static traversal cost, ignoring traffic.
    pub base_weight: f64,
    /// Live effective cost. Owned by the graph store, which keeps it in sync
    /// with `traffic_level` and `is_blocked` via the weight policy.
    pub current_weight: f64,
    /// A blocked edge is untraversable regardless of weight.
    pub is_blocked: bool,
    pub traffic_level: TrafficLevel,
    /// Optional encoded geometry for visualization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
}

/// Live traffic event targeting a single edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficUpdate {
    pub edge_id: EdgeId,
    /// Weight suggested by the traffic collaborator. Advisory only: the store
    /// recomputes the effective weight from the base weight and
    /// `traffic_level` (see [`crate::model::weight`]).
    pub new_weight: f64,
    pub traffic_level: TrafficLevel,
    pub timestamp: DateTime<Utc>,
}

/// `{lat, lng}` wire form for node locations. Collaborators exchange
/// latitude/longitude pairs, while `geo` stores points as (x = lng, y = lat).
mod latlng {
    use geo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct LatLng {
        lat: f64,
        lng: f64,
    }

    pub fn serialize<S: Serializer>(point: &Point<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        LatLng {
            lat: point.y(),
            lng: point.x(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point<f64>, D::Error> {
        let ll = LatLng::deserialize(deserializer)?;
        Ok(Point::new(ll.lng, ll.lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traffic_level_tags_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&TrafficLevel::Medium).unwrap(),
            "\"medium\""
        );
        let parsed: TrafficLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, TrafficLevel::High);
    }

    #[test]
    fn node_location_round_trips_as_lat_lng() {
        let node = Node {
            id: "n1".into(),
            name: "Union Square".into(),
            location: Point::new(-73.99, 40.73),
            address: None,
            place_id: None,
            kind: NodeKind::Landmark,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["location"]["lat"], 40.73);
        assert_eq!(json["location"]["lng"], -73.99);
        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back.location, node.location);
    }
}
