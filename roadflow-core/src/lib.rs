//! Traffic-aware routing engine over a directed road network.
//!
//! The crate owns the graph store ([`model::RoadNetwork`]), the weight policy
//! that turns static edge attributes and live traffic state into effective
//! traversal costs, three pathfinding algorithms (Dijkstra, A*, Bellman-Ford)
//! behind one [`routing::find_route`] entry point, the traffic-update channel
//! ([`live::SharedNetwork`]) and the [`analytics`] read-model built from
//! completed queries.

pub mod analytics;
pub mod error;
pub mod live;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{Edge, Node, NodeKind, RoadNetwork, RoadType, TrafficLevel, TrafficUpdate};
pub use routing::{Algorithm, PathResult, find_route, route_matrix};

/// Stable identifier of a node, assigned by the network builder.
pub type NodeId = String;

/// Stable identifier of a directed edge.
pub type EdgeId = String;
