// Re-export key components
pub use crate::analytics::{Analytics, AnalyticsCollector, CongestedPath, RouteRecord};
pub use crate::live::SharedNetwork;
pub use crate::loading::{EdgeSpec, NetworkData, build_network, load_network};
pub use crate::model::effective_weight;
pub use crate::model::{Edge, Node, NodeKind, RoadNetwork, RoadType, TrafficLevel, TrafficUpdate};
pub use crate::routing::{Algorithm, PathResult, find_route, route_matrix};

// Core identifier types
pub use crate::{EdgeId, Error, NodeId};
