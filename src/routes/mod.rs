//! Router assembly: schedule and common routes behind CORS, body-limit and trace layers.
//!
//! The body limit is enforced by the JSON extractor, so oversized requests are rejected inside the
//! handler and answered with the usual error envelope.

mod common;
mod schedule;
pub use common::common_routes;
pub use schedule::schedule_routes;

use crate::config::{CorsOrigins, GatewayConfig};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Cross-origin access for every route. The browser front end is served from another origin.
pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);
    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(values)
        }
    }
}

pub fn app(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(schedule_routes(state))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}
