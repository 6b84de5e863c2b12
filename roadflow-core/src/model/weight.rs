//! Weight policy: the effective traversal cost of an edge.
//!
//! Single source of truth for both the mutation path (traffic updates) and
//! the query path (algorithm cost lookups). A blocked edge costs infinity and
//! is excluded from traversal; otherwise the cost is the base weight times
//! the traffic multiplier (low 1.0, medium 1.5, high 2.5).
//!
//! Traffic updates carry a caller-supplied `new_weight`. The store ignores it
//! and recomputes from the base weight, so `current_weight` can never
//! contradict the declared traffic level.

use crate::model::TrafficLevel;

/// Effective traversal cost of an edge under the given traffic state.
#[must_use]
pub fn effective_weight(base_weight: f64, traffic_level: TrafficLevel, is_blocked: bool) -> f64 {
    if is_blocked {
        return f64::INFINITY;
    }
    base_weight * traffic_level.multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers() {
        assert_eq!(effective_weight(4.0, TrafficLevel::Low, false), 4.0);
        assert_eq!(effective_weight(4.0, TrafficLevel::Medium, false), 6.0);
        assert_eq!(effective_weight(4.0, TrafficLevel::High, false), 10.0);
    }

    #[test]
    fn blocked_is_infinite_regardless_of_level() {
        assert!(effective_weight(4.0, TrafficLevel::Low, true).is_infinite());
        assert!(effective_weight(0.0, TrafficLevel::High, true).is_infinite());
    }
}
