//! Shared ownership of a live network: the traffic-update channel's side of
//! the engine.
//!
//! Writers funnel through [`SharedNetwork::apply`] and
//! [`SharedNetwork::set_blocked`] behind the write lock, so one mutation is
//! externally indivisible and same-edge updates serialize in arrival order.
//! Queries take the read lock and never mutate; concurrent queries run
//! unordered relative to each other.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use log::{debug, warn};

use crate::model::{RoadNetwork, TrafficUpdate};
use crate::routing::{Algorithm, PathResult, find_route, route_matrix};
use crate::{Error, NodeId};

/// Cloneable handle to a network shared between traffic writers and routing
/// readers.
#[derive(Debug, Clone)]
pub struct SharedNetwork {
    inner: Arc<RwLock<RoadNetwork>>,
}

impl SharedNetwork {
    #[must_use]
    pub fn new(network: RoadNetwork) -> Self {
        SharedNetwork {
            inner: Arc::new(RwLock::new(network)),
        }
    }

    /// Read access to the current network state. Callers that need several
    /// consistent reads (a query plus its congestion snapshot, say) hold one
    /// guard across all of them.
    pub fn read(&self) -> RwLockReadGuard<'_, RoadNetwork> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one traffic event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEdge`] for an absent edge id.
    pub fn apply(&self, update: &TrafficUpdate) -> Result<(), Error> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply_traffic_update(update)
    }

    /// Blocks or unblocks an edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEdge`] for an absent edge id.
    pub fn set_blocked(&self, edge_id: &str, blocked: bool) -> Result<(), Error> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_blocked(edge_id, blocked)
    }

    /// Runs one routing query against the state current at call time.
    ///
    /// # Errors
    ///
    /// Same contract as [`find_route`].
    pub fn find_route(
        &self,
        start: &str,
        end: &str,
        algorithm: Algorithm,
    ) -> Result<PathResult, Error> {
        find_route(&self.read(), start, end, algorithm)
    }

    /// Bulk one-to-many queries against a single consistent snapshot.
    ///
    /// # Errors
    ///
    /// Same contract as [`route_matrix`].
    pub fn route_matrix(
        &self,
        origins: &[NodeId],
        destinations: &[NodeId],
        algorithm: Algorithm,
    ) -> Result<Vec<Vec<PathResult>>, Error> {
        route_matrix(&self.read(), origins, destinations, algorithm)
    }

    /// Drains a traffic feed into the store until the sender hangs up.
    /// Per-event errors are logged and skipped; retries belong to the
    /// upstream collaborator, not to the engine.
    pub fn run_feed(&self, feed: Receiver<TrafficUpdate>) {
        for update in feed {
            match self.apply(&update) {
                Ok(()) => debug!("applied traffic update for edge {}", update.edge_id),
                Err(e) => warn!("dropped traffic update: {e}"),
            }
        }
        debug!("traffic feed closed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use chrono::Utc;
    use geo::Point;

    use super::*;
    use crate::model::{Edge, Node, NodeKind, RoadType, TrafficLevel, effective_weight};

    fn small_network() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        for id in ["a", "b"] {
            network
                .add_node(Node {
                    id: id.to_owned(),
                    name: id.to_owned(),
                    location: Point::new(0.0, 0.0),
                    address: None,
                    place_id: None,
                    kind: NodeKind::Junction,
                })
                .unwrap();
        }
        network
            .add_edge(Edge {
                id: "e1".to_owned(),
                from: "a".to_owned(),
                to: "b".to_owned(),
                distance_km: 1.0,
                duration_min: 1.0,
                road_type: RoadType::Street,
                base_weight: 2.0,
                current_weight: 0.0,
                is_blocked: false,
                traffic_level: TrafficLevel::Low,
                polyline: None,
            })
            .unwrap();
        network
    }

    fn update(level: TrafficLevel) -> TrafficUpdate {
        TrafficUpdate {
            edge_id: "e1".to_owned(),
            new_weight: 0.0,
            traffic_level: level,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn feed_applies_updates_and_skips_bad_ids() {
        let shared = SharedNetwork::new(small_network());
        let (tx, rx) = mpsc::channel();
        let worker = {
            let shared = shared.clone();
            thread::spawn(move || shared.run_feed(rx))
        };
        tx.send(update(TrafficLevel::High)).unwrap();
        tx.send(TrafficUpdate {
            edge_id: "missing".to_owned(),
            ..update(TrafficLevel::Low)
        })
        .unwrap();
        drop(tx);
        worker.join().unwrap();
        assert_eq!(shared.read().edge("e1").unwrap().current_weight, 5.0);
    }

    #[test]
    fn readers_never_observe_a_torn_update() {
        let shared = SharedNetwork::new(small_network());
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let level = if i % 2 == 0 {
                        TrafficLevel::High
                    } else {
                        TrafficLevel::Low
                    };
                    shared.apply(&update(level)).unwrap();
                }
            })
        };
        let reader = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let guard = shared.read();
                    let edge = guard.edge("e1").unwrap();
                    assert_eq!(
                        edge.current_weight,
                        effective_weight(edge.base_weight, edge.traffic_level, edge.is_blocked)
                    );
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
    }
}
