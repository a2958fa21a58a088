// src/store/mod.rs

//! Append-only stores for proctoring events and quiz results.
//!
//! Handlers only see the [`EventLog`] and [`ResultStore`] traits; the backing
//! implementation is picked at startup and injected through `AppState`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{
    error::AppError,
    models::{
        exam_event::{EventId, ExamEvent, NewExamEvent},
        quiz_result::{NewQuizResult, QuizResult, ResultId},
    },
};

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

pub type SharedEventLog = Arc<dyn EventLog>;
pub type SharedResultStore = Arc<dyn ResultStore>;

/// Append-only log of proctoring events.
///
/// `append_event` must be atomic with respect to concurrent callers: the id
/// and `recorded_at` of an event are assigned together with the write.
#[async_trait]
pub trait EventLog: Send + Sync {
    async fn append_event(&self, event: NewExamEvent) -> Result<ExamEvent, AppError>;

    /// Newest first, truncated to `limit` when given.
    async fn list_events(&self, limit: Option<usize>) -> Result<Vec<ExamEvent>, AppError>;

    async fn record_tab_switch(&self, student_id: &str) -> Result<EventId, AppError> {
        let event = self.append_event(NewExamEvent::tab_switch(student_id)).await?;
        Ok(event.id)
    }

    async fn record_face_status(
        &self,
        username: &str,
        status: &str,
        reported_at: Option<DateTime<Utc>>,
    ) -> Result<EventId, AppError> {
        let event = self
            .append_event(NewExamEvent::face_detection(username, status, reported_at))
            .await?;
        Ok(event.id)
    }

    /// Returns the new event id and whether the answer was flagged.
    async fn record_answer(
        &self,
        student_id: &str,
        answer: &str,
    ) -> Result<(EventId, bool), AppError> {
        let event = self
            .append_event(NewExamEvent::answer_submission(student_id, answer))
            .await?;
        Ok((event.id, event.flagged))
    }
}

/// Append-only store of scored quiz attempts.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn insert_result(&self, result: NewQuizResult) -> Result<QuizResult, AppError>;

    /// Newest first; only `username`'s results when given.
    async fn list_results(&self, username: Option<&str>) -> Result<Vec<QuizResult>, AppError>;

    /// Stores a submission. The percentage is recomputed from `score / total`.
    async fn submit_result(
        &self,
        username: Option<String>,
        score: u32,
        total: u32,
        answers: Value,
    ) -> Result<ResultId, AppError> {
        let stored = self
            .insert_result(NewQuizResult::new(username, score, total, answers))
            .await?;
        Ok(stored.id)
    }
}

/// Timestamp for the next append: now, but never earlier than the last entry.
pub(crate) fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    previous.map_or(now, |last| last.max(now))
}
