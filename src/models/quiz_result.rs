// src/models/quiz_result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

pub type ResultId = i64;

/// A scored quiz attempt as stored by the result store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: ResultId,
    pub username: Option<String>,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,

    /// Question id -> submitted choice, stored verbatim.
    pub answers: Value,

    #[serde(rename = "timestamp")]
    pub recorded_at: DateTime<Utc>,
}

/// A result that has not been assigned an id or timestamp yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizResult {
    pub username: Option<String>,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub answers: Value,
}

impl NewQuizResult {
    /// Builds a result whose percentage is derived from `score` and `total`.
    /// `score <= total` is not enforced.
    pub fn new(username: Option<String>, score: u32, total: u32, answers: Value) -> Self {
        Self {
            username,
            score,
            total,
            percentage: percentage(score, total),
            answers,
        }
    }

    pub fn into_result(self, id: ResultId, recorded_at: DateTime<Utc>) -> QuizResult {
        QuizResult {
            id,
            username: self.username,
            score: self.score,
            total: self.total,
            percentage: self.percentage,
            answers: self.answers,
            recorded_at,
        }
    }
}

/// `score / total * 100`, or `0.0` for an empty quiz.
pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score) * 100.0 / f64::from(total)
}

fn empty_answers() -> Value {
    Value::Object(Default::default())
}

/// DTO for `POST /quiz/submit`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    /// Falls back to the bearer token subject when absent.
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,

    #[serde(default = "empty_answers")]
    pub answers: Value,

    pub score: u32,
    pub total: u32,

    /// Client-computed value. Only compared against the server-side figure.
    pub percentage: Option<f64>,
}

/// Query string for `GET /quiz/results`.
#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    pub status: String,
    pub message: String,
    pub result_id: ResultId,
}
