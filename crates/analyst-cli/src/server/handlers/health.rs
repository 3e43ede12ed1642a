//! Liveness endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub environment: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        environment: state.settings.environment.clone(),
    })
}
