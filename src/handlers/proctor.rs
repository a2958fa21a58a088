// src/handlers/proctor.rs

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    config::Config,
    error::AppError,
    models::exam_event::{
        FaceDetectionRequest, LogsQuery, SubmitAnswerRequest, SubmitAnswerResponse,
        TabSwitchRequest,
    },
    store::SharedEventLog,
    utils::extract::ValidJson,
};

/// Records that a student left the exam tab.
pub async fn tab_switch(
    State(events): State<SharedEventLog>,
    ValidJson(req): ValidJson<TabSwitchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = events.record_tab_switch(&req.student_id).await?;
    tracing::info!(event_id, student_id = %req.student_id, "Tab switch recorded");

    Ok(Json(json!({ "status": "tab switch recorded" })))
}

/// Records the webcam face-detection status reported by the client.
/// The status string is stored as-is.
pub async fn face_detection_status(
    State(events): State<SharedEventLog>,
    ValidJson(req): ValidJson<FaceDetectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = events
        .record_face_status(&req.username, &req.status, req.reported_at())
        .await?;
    tracing::debug!(event_id, username = %req.username, status = %req.status, "Face status recorded");

    Ok(Json(json!({ "status": "recorded" })))
}

/// Stores a submitted answer and reports whether it looks AI-generated.
pub async fn submit_answer(
    State(events): State<SharedEventLog>,
    ValidJson(req): ValidJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (event_id, suspicious) = events.record_answer(&req.student_id, &req.answer).await?;

    if suspicious {
        tracing::warn!(event_id, student_id = %req.student_id, "Suspicious answer submitted");
    } else {
        tracing::info!(event_id, student_id = %req.student_id, "Answer recorded");
    }

    Ok(Json(SubmitAnswerResponse {
        status: "success".to_string(),
        suspicious,
    }))
}

/// Lists proctoring events, newest first.
///
/// `?limit=` narrows the page; it can never exceed `max_log_entries`.
pub async fn list_logs(
    State(events): State<SharedEventLog>,
    State(config): State<Config>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let limit = query
        .limit
        .map_or(config.max_log_entries, |l| l.min(config.max_log_entries));

    let logs = events.list_events(Some(limit)).await?;
    Ok(Json(logs))
}
