//! Chart data handler.

use std::sync::Arc;

use analyst::{ChartPayload, ChartRequest, ChartType};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChartDataRequest {
    pub chart_type: ChartType,
    pub x: String,
    #[serde(default)]
    pub y: Option<String>,
    /// Defaults to the most recent upload.
    #[serde(default)]
    pub dataset_id: Option<String>,
}

pub async fn chart_data(
    State(state): State<AppState>,
    payload: Result<Json<ChartDataRequest>, JsonRejection>,
) -> Result<Json<ChartPayload>, ApiError> {
    let Json(request) = payload?;

    let dataset = {
        let store = state.store.read().await;
        let entry = match &request.dataset_id {
            Some(id) => store
                .get(id)
                .ok_or_else(|| ApiError::NotFound(format!("No dataset with id '{}'", id)))?,
            None => store.current().ok_or_else(|| {
                ApiError::BadRequest("No dataset loaded: upload a file first".to_string())
            })?,
        };
        debug!(dataset = %entry.id, file = %entry.filename, "projecting chart");
        Arc::clone(&entry.dataset)
    };

    // Forms send an empty string for "no y column".
    let y = request.y.filter(|y| !y.trim().is_empty());
    let chart_request = ChartRequest::new(request.chart_type, request.x, y);

    state
        .analyst
        .chart_data(&dataset, &chart_request)
        .map(Json)
        .map_err(|e| ApiError::from_analyst(e, state.is_production()))
}
