//! The graph store: canonical node/edge collections and the adjacency index.
//!
//! The store is the sole owner of node and edge state. All mutation goes
//! through the narrow entry points below (`add_node`, `add_edge`,
//! `apply_traffic_update`, `set_blocked`); every read is pure. After each
//! mutation the adjacency index is exactly the set of edges grouped by
//! `from`, and every `current_weight` matches the weight policy applied to
//! the edge's latest traffic state.

use hashbrown::HashMap;
use log::trace;

use crate::model::weight::effective_weight;
use crate::model::{Edge, Node, TrafficUpdate};
use crate::{EdgeId, Error, NodeId};

#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
    /// Outgoing edge ids per node, in edge-insertion order.
    adjacency: HashMap<NodeId, Vec<EdgeId>>,
    /// All edge ids in insertion order, for deterministic full-set iteration.
    edge_order: Vec<EdgeId>,
}

impl RoadNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node and its (initially empty) adjacency row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if a node with the same id exists.
    pub fn add_node(&mut self, node: Node) -> Result<(), Error> {
        if self.nodes.contains_key(&node.id) {
            return Err(Error::DuplicateId(node.id));
        }
        self.adjacency.insert(node.id.clone(), Vec::new());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Inserts a directed edge and derives its effective weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if either endpoint is absent,
    /// [`Error::DuplicateId`] on an edge id collision, and
    /// [`Error::InvalidData`] for negative distance or duration.
    pub fn add_edge(&mut self, mut edge: Edge) -> Result<(), Error> {
        if self.edges.contains_key(&edge.id) {
            return Err(Error::DuplicateId(edge.id));
        }
        if !self.nodes.contains_key(&edge.from) {
            return Err(Error::UnknownNode(edge.from));
        }
        if !self.nodes.contains_key(&edge.to) {
            return Err(Error::UnknownNode(edge.to));
        }
        if edge.distance_km < 0.0 || edge.duration_min < 0.0 {
            return Err(Error::InvalidData(format!(
                "edge {} has negative distance or duration",
                edge.id
            )));
        }
        edge.current_weight = effective_weight(edge.base_weight, edge.traffic_level, edge.is_blocked);
        self.adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(edge.id.clone());
        self.edge_order.push(edge.id.clone());
        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Applies one traffic event: sets the traffic level and recomputes the
    /// effective weight in the same call, so readers never observe the two
    /// out of sync. The event's `new_weight` is advisory and ignored.
    /// Applying the same event twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEdge`] if the event targets an absent edge.
    pub fn apply_traffic_update(&mut self, update: &TrafficUpdate) -> Result<(), Error> {
        let edge = self
            .edges
            .get_mut(&update.edge_id)
            .ok_or_else(|| Error::UnknownEdge(update.edge_id.clone()))?;
        edge.traffic_level = update.traffic_level;
        edge.current_weight = effective_weight(edge.base_weight, edge.traffic_level, edge.is_blocked);
        trace!(
            "edge {} -> {:?}, effective weight {}",
            edge.id, edge.traffic_level, edge.current_weight
        );
        Ok(())
    }

    /// Blocks or unblocks an edge. Blocking drives the effective weight to
    /// infinity; unblocking restores the traffic-derived weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEdge`] for an absent edge id.
    pub fn set_blocked(&mut self, edge_id: &str, blocked: bool) -> Result<(), Error> {
        let edge = self
            .edges
            .get_mut(edge_id)
            .ok_or_else(|| Error::UnknownEdge(edge_id.to_owned()))?;
        edge.is_blocked = blocked;
        edge.current_weight = effective_weight(edge.base_weight, edge.traffic_level, edge.is_blocked);
        trace!("edge {} blocked = {}", edge.id, blocked);
        Ok(())
    }

    /// Outgoing edge ids of a node, in insertion order. A valid node with no
    /// outgoing edges yields an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for an absent node id.
    pub fn neighbors(&self, node_id: &str) -> Result<&[EdgeId], Error> {
        self.adjacency
            .get(node_id)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownNode(node_id.to_owned()))
    }

    /// Outgoing edges of a node, resolved, in insertion order. Empty for an
    /// unknown node; callers validate ids up front via [`Self::contains_node`].
    pub fn outgoing_edges(&self, node_id: &str) -> impl Iterator<Item = &Edge> {
        self.adjacency
            .get(node_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    /// All edge ids in insertion order.
    #[must_use]
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edge_order
    }

    #[must_use]
    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    #[must_use]
    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    #[must_use]
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    #[must_use]
    pub fn contains_edge(&self, edge_id: &str) -> bool {
        self.edges.contains_key(edge_id)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
