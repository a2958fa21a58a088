// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{auth, proctor, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the bare endpoints (`/login`, `/tab_switch`, `/quiz/...`).
/// * Mounts the same handlers under `/api/...` with trailing slashes.
/// * Applies request tracing and injects the shared state.
pub fn create_router(state: AppState) -> Router {
    let quiz_routes = Router::new()
        .route("/questions", get(quiz::get_questions))
        .route("/submit", post(quiz::submit_quiz))
        .route("/results", get(quiz::get_results));

    let legacy_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/tab_switch", post(proctor::tab_switch))
        .route("/face_detection_status", post(proctor::face_detection_status))
        .route("/submit_answer", post(proctor::submit_answer))
        .route("/logs", get(proctor::list_logs))
        .route("/questions.json", get(quiz::get_questions))
        .nest("/quiz", quiz_routes);

    let api_routes = Router::new()
        .route("/login/", post(auth::login))
        .route("/tab-switch/", post(proctor::tab_switch))
        .route("/face-detection-status/", post(proctor::face_detection_status))
        .route("/submit-answer/", post(proctor::submit_answer))
        .route("/logs/", get(proctor::list_logs))
        .route("/quiz/questions/", get(quiz::get_questions))
        .route("/quiz/submit/", post(quiz::submit_quiz))
        .route("/quiz/results/", get(quiz::get_results));

    Router::new()
        .merge(legacy_routes)
        .nest("/api", api_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
