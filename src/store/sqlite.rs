// src/store/sqlite.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    types::Json,
};
use std::str::FromStr;

use super::{EventLog, ResultStore, next_timestamp};
use crate::{
    error::AppError,
    models::{
        exam_event::{EventKind, ExamEvent, NewExamEvent},
        quiz_result::{NewQuizResult, QuizResult},
    },
};

/// SQLite-backed store.
///
/// The pool holds a single connection, so writers are serialized and
/// `sqlite::memory:` databases survive for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct EventRow {
    id: i64,
    username: Option<String>,
    student_id: Option<String>,
    kind: String,
    answer: Option<String>,
    status: Option<String>,
    flagged: bool,
    reported_at: Option<DateTime<Utc>>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for ExamEvent {
    type Error = AppError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let kind = EventKind::from_str(&row.kind).map_err(AppError::InternalServerError)?;
        Ok(ExamEvent {
            id: row.id,
            username: row.username,
            student_id: row.student_id,
            kind,
            answer: row.answer,
            status: row.status,
            flagged: row.flagged,
            reported_at: row.reported_at,
            recorded_at: row.recorded_at,
        })
    }
}

#[derive(FromRow)]
struct ResultRow {
    id: i64,
    username: Option<String>,
    score: i64,
    total: i64,
    percentage: f64,
    answers: Json<Value>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<ResultRow> for QuizResult {
    type Error = AppError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        let to_u32 = |value: i64, column: &str| {
            u32::try_from(value).map_err(|_| {
                AppError::InternalServerError(format!("quiz_results.{column} out of range: {value}"))
            })
        };
        Ok(QuizResult {
            id: row.id,
            username: row.username,
            score: to_u32(row.score, "score")?,
            total: to_u32(row.total, "total")?,
            percentage: row.percentage,
            answers: row.answers.0,
            recorded_at: row.recorded_at,
        })
    }
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and applies migrations.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        tracing::info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied successfully.");

        Ok(Self { pool })
    }
}

#[async_trait]
impl EventLog for SqliteStore {
    async fn append_event(&self, event: NewExamEvent) -> Result<ExamEvent, AppError> {
        let mut tx = self.pool.begin().await?;

        let last: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT recorded_at FROM exam_events ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;
        let recorded_at = next_timestamp(last);

        let id = sqlx::query(
            r#"
            INSERT INTO exam_events
                (username, student_id, kind, answer, status, flagged, reported_at, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.username)
        .bind(&event.student_id)
        .bind(event.kind.as_str())
        .bind(&event.answer)
        .bind(&event.status)
        .bind(event.flagged)
        .bind(event.reported_at)
        .bind(recorded_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert exam event: {:?}", e);
            AppError::from(e)
        })?
        .last_insert_rowid();

        tx.commit().await?;
        Ok(event.into_event(id, recorded_at))
    }

    async fn list_events(&self, limit: Option<usize>) -> Result<Vec<ExamEvent>, AppError> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
            SELECT id, username, student_id, kind, answer, status, flagged, reported_at, recorded_at
            FROM exam_events
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ExamEvent::try_from).collect()
    }
}

#[async_trait]
impl ResultStore for SqliteStore {
    async fn insert_result(&self, result: NewQuizResult) -> Result<QuizResult, AppError> {
        let mut tx = self.pool.begin().await?;

        let last: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT recorded_at FROM quiz_results ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;
        let recorded_at = next_timestamp(last);

        let id = sqlx::query(
            r#"
            INSERT INTO quiz_results (username, score, total, percentage, answers, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&result.username)
        .bind(i64::from(result.score))
        .bind(i64::from(result.total))
        .bind(result.percentage)
        .bind(Json(&result.answers))
        .bind(recorded_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz result: {:?}", e);
            AppError::from(e)
        })?
        .last_insert_rowid();

        tx.commit().await?;
        Ok(result.into_result(id, recorded_at))
    }

    async fn list_results(&self, username: Option<&str>) -> Result<Vec<QuizResult>, AppError> {
        let rows: Vec<ResultRow> = match username {
            Some(name) => {
                sqlx::query_as(
                    r#"
                    SELECT id, username, score, total, percentage, answers, recorded_at
                    FROM quiz_results
                    WHERE username = ?
                    ORDER BY id DESC
                    "#,
                )
                .bind(name)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, username, score, total, percentage, answers, recorded_at
                    FROM quiz_results
                    ORDER BY id DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(QuizResult::try_from).collect()
    }
}
