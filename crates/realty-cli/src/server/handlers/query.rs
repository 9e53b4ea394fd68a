//! Natural-language query handler.

use axum::{Json, body::Bytes, extract::State};
use realty::QueryResponse;
use serde_json::Value;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Answer `{"query": "..."}`. A body that is not JSON is a 400.
pub async fn handle_query(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<QueryResponse>, ApiError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON body.".to_string()))?;

    let query = payload
        .get("query")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let response = state.analyst.answer(query)?;
    log::info!(
        "Answered {:?} with {} rows ({})",
        query.trim(),
        response.table_data.len(),
        response.chart_type
    );
    Ok(Json(response))
}
