//! Liveness and readiness. Both report the build so a deployment can be identified from either.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct GatewayStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl GatewayStatus {
    fn report(status: &'static str, database: Option<&'static str>) -> Self {
        GatewayStatus {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }
}

async fn alive() -> Json<GatewayStatus> {
    Json(GatewayStatus::report("ok", None))
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<GatewayStatus>) {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "database unreachable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(GatewayStatus::report("degraded", Some("unavailable"))),
        );
    }
    (StatusCode::OK, Json(GatewayStatus::report("ok", Some("ok"))))
}

/// GET /health (process only) and GET /ready (one store round trip).
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(alive))
        .route("/ready", get(ready))
        .with_state(state)
}
