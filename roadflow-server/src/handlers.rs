//! Request handlers: thin adapters between JSON bodies and the engine.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use roadflow_core::analytics::{Analytics, RouteRecord};
use roadflow_core::model::TrafficUpdate;
use roadflow_core::routing::{Algorithm, PathResult, find_route};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", post(route))
        .route("/traffic", post(traffic))
        .route("/blocked", post(blocked))
        .route("/analytics", get(analytics))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct RouteRequest {
    start: String,
    end: String,
    algorithm: Algorithm,
    /// Optional caller identity, only used by the analytics projection.
    #[serde(default)]
    user: Option<String>,
}

async fn route(
    State(app): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<PathResult>, ApiError> {
    // One read guard across the query and its congestion snapshot, so the
    // record prices the same state the router saw.
    let (result, record) = {
        let network = app.network.read();
        let result = find_route(&network, &req.start, &req.end, req.algorithm)?;
        let record = RouteRecord::from_result(&network, &result, req.user, Utc::now());
        (result, record)
    };
    app.with_analytics(|collector| collector.record(record));
    Ok(Json(result))
}

/// Accepts a single update or a batch; the collaborator pushes on its own
/// cadence. Updates apply in arrival order, stopping at the first bad id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TrafficBody {
    One(TrafficUpdate),
    Many(Vec<TrafficUpdate>),
}

#[derive(Debug, Serialize)]
struct Applied {
    applied: usize,
}

async fn traffic(
    State(app): State<AppState>,
    Json(body): Json<TrafficBody>,
) -> Result<Json<Applied>, ApiError> {
    let updates = match body {
        TrafficBody::One(update) => vec![update],
        TrafficBody::Many(updates) => updates,
    };
    let mut applied = 0;
    for update in &updates {
        app.network.apply(update)?;
        applied += 1;
    }
    Ok(Json(Applied { applied }))
}

#[derive(Debug, Deserialize)]
struct BlockRequest {
    edge_id: String,
    blocked: bool,
}

async fn blocked(
    State(app): State<AppState>,
    Json(req): Json<BlockRequest>,
) -> Result<Json<Applied>, ApiError> {
    app.network.set_blocked(&req.edge_id, req.blocked)?;
    Ok(Json(Applied { applied: 1 }))
}

async fn analytics(State(app): State<AppState>) -> Json<Analytics> {
    let top_n = app.top_congested;
    Json(app.with_analytics(|collector| collector.analytics(top_n)))
}
