//! Query-history read model.
//!
//! Purely derived from completed routing queries; carries no engine
//! invariants and can always be recomputed from the record stream.

use chrono::{DateTime, Timelike, Utc};
use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::NodeId;
use crate::model::RoadNetwork;
use crate::routing::{Algorithm, PathResult};

/// One completed routing query, as fed to the collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecord {
    pub algorithm: Algorithm,
    pub path: Vec<NodeId>,
    /// Mean current/base weight ratio over the traversed edges; 1.0 for an
    /// empty or free-flowing path.
    pub congestion: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RouteRecord {
    /// Snapshots a completed query. Pass the same network state the query
    /// observed so the congestion ratio matches what the router priced.
    #[must_use]
    pub fn from_result(
        network: &RoadNetwork,
        result: &PathResult,
        user: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        RouteRecord {
            algorithm: result.algorithm,
            path: result.path.clone(),
            congestion: congestion_ratio(network, &result.path),
            user,
            timestamp,
        }
    }
}

/// Mean current/base weight ratio over the edges a path traverses. Parallel
/// edges resolve to the cheapest live candidate, matching what the router
/// would pick.
#[must_use]
pub fn congestion_ratio(network: &RoadNetwork, path: &[NodeId]) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for pair in path.windows(2) {
        let edge = network
            .outgoing_edges(&pair[0])
            .filter(|e| e.to == pair[1] && e.current_weight.is_finite())
            .min_by(|a, b| a.current_weight.total_cmp(&b.current_weight));
        if let Some(edge) = edge {
            if edge.base_weight > 0.0 {
                total += edge.current_weight / edge.base_weight;
                count += 1;
            }
        }
    }
    if count == 0 { 1.0 } else { total / count as f64 }
}

/// A path ranked by its observed congestion across recorded queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestedPath {
    pub path: Vec<NodeId>,
    /// Mean congestion ratio over every record of this path.
    pub congestion: f64,
    /// How many recorded queries used the path.
    pub count: u64,
}

/// The derived projection served to the analytics UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    pub total_routes: u64,
    pub algorithm_usage: HashMap<Algorithm, u64>,
    pub most_congested_paths: Vec<CongestedPath>,
    pub active_users: u64,
    /// Route count per UTC hour of day.
    pub peak_hours: [u64; 24],
}

/// Accumulates route records and projects them into [`Analytics`].
#[derive(Debug, Clone, Default)]
pub struct AnalyticsCollector {
    records: Vec<RouteRecord>,
}

impl AnalyticsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: RouteRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Projects the record history, ranking at most `top_n` congested paths.
    #[must_use]
    pub fn analytics(&self, top_n: usize) -> Analytics {
        let mut algorithm_usage: HashMap<Algorithm, u64> = HashMap::new();
        let mut peak_hours = [0u64; 24];
        for record in &self.records {
            *algorithm_usage.entry(record.algorithm).or_insert(0) += 1;
            peak_hours[record.timestamp.hour() as usize] += 1;
        }

        let active_users = self
            .records
            .iter()
            .filter_map(|r| r.user.as_deref())
            .unique()
            .count() as u64;

        let mut by_path: HashMap<&[NodeId], (f64, u64)> = HashMap::new();
        for record in &self.records {
            if record.path.is_empty() {
                continue;
            }
            let slot = by_path.entry(record.path.as_slice()).or_insert((0.0, 0));
            slot.0 += record.congestion;
            slot.1 += 1;
        }
        let most_congested_paths: Vec<CongestedPath> = by_path
            .into_iter()
            .map(|(path, (sum, count))| CongestedPath {
                path: path.to_vec(),
                congestion: sum / count as f64,
                count,
            })
            .sorted_by(|a, b| {
                b.congestion
                    .total_cmp(&a.congestion)
                    .then_with(|| a.path.cmp(&b.path))
            })
            .take(top_n)
            .collect();

        Analytics {
            total_routes: self.records.len() as u64,
            algorithm_usage,
            most_congested_paths,
            active_users,
            peak_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(
        algorithm: Algorithm,
        path: &[&str],
        congestion: f64,
        user: Option<&str>,
        hour: u32,
    ) -> RouteRecord {
        RouteRecord {
            algorithm,
            path: path.iter().map(|s| (*s).to_owned()).collect(),
            congestion,
            user: user.map(str::to_owned),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 23, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn projection_counts_usage_users_and_hours() {
        let mut collector = AnalyticsCollector::new();
        collector.record(record(Algorithm::Dijkstra, &["a", "b"], 1.0, Some("u1"), 8));
        collector.record(record(Algorithm::Dijkstra, &["a", "b"], 2.0, Some("u2"), 8));
        collector.record(record(Algorithm::AStar, &["a", "c"], 2.5, Some("u1"), 17));
        collector.record(record(Algorithm::BellmanFord, &[], 1.0, None, 17));

        let analytics = collector.analytics(10);
        assert_eq!(analytics.total_routes, 4);
        assert_eq!(analytics.algorithm_usage[&Algorithm::Dijkstra], 2);
        assert_eq!(analytics.algorithm_usage[&Algorithm::AStar], 1);
        assert_eq!(analytics.active_users, 2);
        assert_eq!(analytics.peak_hours[8], 2);
        assert_eq!(analytics.peak_hours[17], 2);

        // Not-found queries count toward totals but never rank as paths.
        assert_eq!(analytics.most_congested_paths.len(), 2);
        let top = &analytics.most_congested_paths[0];
        assert_eq!(top.path, ["a", "c"]);
        assert_eq!(top.congestion, 2.5);
        let second = &analytics.most_congested_paths[1];
        assert_eq!(second.path, ["a", "b"]);
        assert_eq!(second.congestion, 1.5);
        assert_eq!(second.count, 2);
    }

    #[test]
    fn top_n_truncates_deterministically() {
        let mut collector = AnalyticsCollector::new();
        collector.record(record(Algorithm::Dijkstra, &["a", "b"], 2.0, None, 0));
        collector.record(record(Algorithm::Dijkstra, &["a", "c"], 2.0, None, 0));
        collector.record(record(Algorithm::Dijkstra, &["a", "d"], 3.0, None, 0));
        let analytics = collector.analytics(2);
        // Equal ratios fall back to path order.
        assert_eq!(analytics.most_congested_paths[0].path, ["a", "d"]);
        assert_eq!(analytics.most_congested_paths[1].path, ["a", "b"]);
    }
}
