// src/store/memory.rs

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{EventLog, ResultStore, next_timestamp};
use crate::{
    error::AppError,
    models::{
        exam_event::{ExamEvent, NewExamEvent},
        quiz_result::{NewQuizResult, QuizResult},
    },
};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<InMemoryStoreInner>,
}

#[derive(Debug, Default)]
struct InMemoryStoreInner {
    events: Vec<ExamEvent>,
    results: Vec<QuizResult>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, InMemoryStoreInner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::InternalServerError("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EventLog for InMemoryStore {
    async fn append_event(&self, event: NewExamEvent) -> Result<ExamEvent, AppError> {
        let mut inner = self.lock()?;
        let last = inner.events.last();
        let id = last.map_or(1, |e| e.id + 1);
        let recorded_at = next_timestamp(last.map(|e| e.recorded_at));

        let event = event.into_event(id, recorded_at);
        inner.events.push(event.clone());
        Ok(event)
    }

    async fn list_events(&self, limit: Option<usize>) -> Result<Vec<ExamEvent>, AppError> {
        let inner = self.lock()?;
        let limit = limit.unwrap_or(usize::MAX);
        Ok(inner.events.iter().rev().take(limit).cloned().collect())
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    async fn insert_result(&self, result: NewQuizResult) -> Result<QuizResult, AppError> {
        let mut inner = self.lock()?;
        let last = inner.results.last();
        let id = last.map_or(1, |r| r.id + 1);
        let recorded_at = next_timestamp(last.map(|r| r.recorded_at));

        let result = result.into_result(id, recorded_at);
        inner.results.push(result.clone());
        Ok(result)
    }

    async fn list_results(&self, username: Option<&str>) -> Result<Vec<QuizResult>, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .results
            .iter()
            .rev()
            .filter(|r| username.is_none_or(|name| r.username.as_deref() == Some(name)))
            .cloned()
            .collect())
    }
}
