//! Road network data model
//!
//! Contains the node/edge components, the graph store that owns them,
//! and the weight policy shared by the mutation and query paths.

pub mod components;
pub mod graph;
pub mod weight;

pub use components::{Edge, Node, NodeKind, RoadType, TrafficLevel, TrafficUpdate};
pub use graph::RoadNetwork;
pub use weight::effective_weight;
