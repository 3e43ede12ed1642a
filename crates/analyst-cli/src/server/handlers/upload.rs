//! Upload handler: parse, store and analyze a data file.

use std::sync::Arc;
use std::time::Duration;

use analyst::{AnalysisReport, Analyst, Dataset, Insight, InsightSource};
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::server::error::ApiError;
use crate::server::state::{AppState, StoredDataset};

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Content hash; pass it back as `dataset_id` to chart a specific upload.
    pub dataset_id: String,
    pub filename: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub chart_suggestions: Vec<Insight>,
    pub insight_source: InsightSource,
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let production = state.is_production();

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| ApiError::BadRequest("Uploaded file has no name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
        file = Some((filename, bytes));
        break;
    }
    let (filename, bytes) = file.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing multipart field '{}'", FILE_FIELD))
    })?;
    info!(file = %filename, size = bytes.len(), "upload received");

    let analyst = Arc::clone(&state.analyst);
    let name = filename.clone();
    let (dataset, source) = tokio::task::spawn_blocking(move || analyst.load_bytes(&bytes, &name))
        .await
        .map_err(|e| ApiError::internal(e, production))?
        .map_err(|e| ApiError::from_analyst(e, production))?;
    let dataset = Arc::new(dataset);

    {
        let mut store = state.store.write().await;
        store.insert(StoredDataset {
            id: source.hash.clone(),
            filename: filename.clone(),
            dataset: Arc::clone(&dataset),
        });
        info!(dataset = %source.hash, stored = store.len(), "dataset stored");
    }

    let report = analyze(&state, dataset).await?;

    Ok(Json(UploadResponse {
        success: true,
        dataset_id: source.hash,
        filename,
        rows: report.row_count,
        columns: report.column_names,
        chart_suggestions: report.insights,
        insight_source: report.insight_source,
    }))
}

/// Run the analysis off the async workers. If it outlives the configured
/// timeout (a slow suggestion provider), answer with rule-based insights.
async fn analyze(state: &AppState, dataset: Arc<Dataset>) -> Result<AnalysisReport, ApiError> {
    let production = state.is_production();
    let limit = Duration::from_secs(state.settings.llm_timeout_secs);

    let analyst = Arc::clone(&state.analyst);
    let task_dataset = Arc::clone(&dataset);
    let task = tokio::task::spawn_blocking(move || analyst.analyze(&task_dataset));

    match tokio::time::timeout(limit, task).await {
        Ok(joined) => joined.map_err(|e| ApiError::internal(e, production)),
        // The detached task keeps its blocking thread until the provider's
        // own HTTP timeout (the same `llm_timeout_secs`) ends the request.
        Err(_) => {
            warn!(
                timeout_secs = state.settings.llm_timeout_secs,
                "analysis timed out, using rules"
            );
            let rules = Analyst::new();
            tokio::task::spawn_blocking(move || rules.analyze(&dataset))
                .await
                .map_err(|e| ApiError::internal(e, production))
        }
    }
}
