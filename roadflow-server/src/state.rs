use std::sync::{Arc, Mutex, PoisonError};

use roadflow_core::analytics::AnalyticsCollector;
use roadflow_core::live::SharedNetwork;
use roadflow_core::model::RoadNetwork;

#[derive(Clone)]
pub struct AppState {
    pub network: SharedNetwork,
    analytics: Arc<Mutex<AnalyticsCollector>>,
    pub top_congested: usize,
}

impl AppState {
    pub fn new(network: RoadNetwork, top_congested: usize) -> Self {
        AppState {
            network: SharedNetwork::new(network),
            analytics: Arc::new(Mutex::new(AnalyticsCollector::new())),
            top_congested,
        }
    }

    pub fn with_analytics<T>(&self, f: impl FnOnce(&mut AnalyticsCollector) -> T) -> T {
        let mut guard = self
            .analytics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
