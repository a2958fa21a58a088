// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::IntoResponse,
};

use crate::{
    catalog::QuestionCatalog,
    error::AppError,
    models::quiz_result::{ResultsQuery, SubmitQuizRequest, SubmitQuizResponse, percentage},
    store::SharedResultStore,
    utils::{extract::ValidJson, jwt::MaybeClaims},
};

/// Serves the question document exactly as stored on disk.
pub async fn get_questions(
    State(catalog): State<Arc<QuestionCatalog>>,
) -> Result<impl IntoResponse, AppError> {
    let document = catalog.get_questions().await.inspect_err(|e| {
        tracing::warn!(path = %catalog.path().display(), "Question catalog unavailable: {}", e);
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], document))
}

/// Stores a quiz attempt.
///
/// * `username` falls back to the bearer token subject.
/// * The percentage is recomputed from `score / total`; a differing client
///   value is only logged.
pub async fn submit_quiz(
    State(results): State<SharedResultStore>,
    claims: MaybeClaims,
    ValidJson(req): ValidJson<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = req.username.or_else(|| claims.subject().map(str::to_owned));

    let computed = percentage(req.score, req.total);
    if let Some(supplied) = req.percentage {
        // Clients round to the nearest integer.
        if (supplied - computed).abs() > 0.5 {
            tracing::warn!(
                supplied,
                computed,
                username = username.as_deref().unwrap_or("anonymous"),
                "Client percentage disagrees with score/total"
            );
        }
    }

    let result_id = results
        .submit_result(username.clone(), req.score, req.total, req.answers)
        .await?;
    tracing::info!(
        result_id,
        username = username.as_deref().unwrap_or("anonymous"),
        score = req.score,
        total = req.total,
        "Quiz result stored"
    );

    Ok(Json(SubmitQuizResponse {
        status: "success".to_string(),
        message: "Quiz submitted successfully".to_string(),
        result_id,
    }))
}

/// Lists quiz results, newest first.
///
/// Filters by `?username=`, or by the bearer token subject when the query
/// omits it. Without either, every result is returned.
pub async fn get_results(
    State(results): State<SharedResultStore>,
    claims: MaybeClaims,
    query: Result<Query<ResultsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let username = query
        .username
        .filter(|name| !name.is_empty())
        .or_else(|| claims.subject().map(str::to_owned));

    let list = results.list_results(username.as_deref()).await?;
    Ok(Json(list))
}
