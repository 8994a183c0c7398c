//! Inbound webhook handler.

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bridge_core::pipeline::{process_event, ProcessReport};
use serde_json::Value;

/// Handle a GoHighLevel webhook delivery.
///
/// The pipeline always answers with a structured report; `success` and
/// `ignored` map to 200, `error` to a failed request with the report as
/// body so the sender sees the reason.
pub async fn gohighlevel_webhook(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    tracing::info!("Received webhook");

    let report = process_event(state.directory.as_ref(), &state.mapping_table, &body).await;

    let status = match &report {
        ProcessReport::Success { .. } | ProcessReport::Ignored { .. } => StatusCode::OK,
        ProcessReport::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(report)).into_response()
}
