use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use tracing::log::debug;

pub struct HealthRoutes;

impl HealthRoutes {
    pub fn routes() -> Router {
        Router::new().route("/", get(health_handler))
    }
}

async fn health_handler() -> Json<HashMap<&'static str, &'static str>> {
    debug!("GET /health");
    Json(HashMap::from([("status", "up")]))
}
