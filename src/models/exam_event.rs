// src/models/exam_event.rs

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::utils::detection::is_suspicious;

pub type EventId = i64;

/// Kind tag of a proctoring event. Serialized as the `event` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TabSwitch,
    FaceDetection,
    AnswerSubmission,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::TabSwitch => "tab_switch",
            EventKind::FaceDetection => "face_detection",
            EventKind::AnswerSubmission => "answer_submission",
        }
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab_switch" => Ok(EventKind::TabSwitch),
            "face_detection" => Ok(EventKind::FaceDetection),
            "answer_submission" => Ok(EventKind::AnswerSubmission),
            other => Err(format!("unknown event kind '{other}'")),
        }
    }
}

/// A stored proctoring event. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamEvent {
    pub id: EventId,

    /// Set on face-detection events.
    pub username: Option<String>,

    /// Set on tab-switch and answer events.
    pub student_id: Option<String>,

    #[serde(rename = "event")]
    pub kind: EventKind,

    pub answer: Option<String>,

    pub status: Option<String>,

    /// Only ever true for `answer_submission` events.
    #[serde(rename = "suspicious")]
    pub flagged: bool,

    /// Timestamp reported by the client, kept as metadata only.
    pub reported_at: Option<DateTime<Utc>>,

    /// Server-assigned, non-decreasing in insertion order.
    #[serde(rename = "timestamp")]
    pub recorded_at: DateTime<Utc>,
}

impl ExamEvent {
    /// The identity this event is attributed to.
    pub fn actor(&self) -> &str {
        let authoritative = match self.kind {
            EventKind::FaceDetection => self.username.as_deref().or(self.student_id.as_deref()),
            EventKind::TabSwitch | EventKind::AnswerSubmission => {
                self.student_id.as_deref().or(self.username.as_deref())
            }
        };
        authoritative.unwrap_or_default()
    }
}

/// An event that has not been assigned an id or timestamp yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExamEvent {
    pub username: Option<String>,
    pub student_id: Option<String>,
    pub kind: EventKind,
    pub answer: Option<String>,
    pub status: Option<String>,
    pub flagged: bool,
    pub reported_at: Option<DateTime<Utc>>,
}

impl NewExamEvent {
    pub fn tab_switch(student_id: impl Into<String>) -> Self {
        Self {
            username: None,
            student_id: Some(student_id.into()),
            kind: EventKind::TabSwitch,
            answer: None,
            status: None,
            flagged: false,
            reported_at: None,
        }
    }

    pub fn face_detection(
        username: impl Into<String>,
        status: impl Into<String>,
        reported_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            student_id: None,
            kind: EventKind::FaceDetection,
            answer: None,
            status: Some(status.into()),
            flagged: false,
            reported_at,
        }
    }

    /// Flags the answer when it carries the AI-generated marker.
    pub fn answer_submission(student_id: impl Into<String>, answer: impl Into<String>) -> Self {
        let answer = answer.into();
        Self {
            username: None,
            student_id: Some(student_id.into()),
            kind: EventKind::AnswerSubmission,
            flagged: is_suspicious(&answer),
            answer: Some(answer),
            status: None,
            reported_at: None,
        }
    }

    pub fn into_event(self, id: EventId, recorded_at: DateTime<Utc>) -> ExamEvent {
        ExamEvent {
            id,
            username: self.username,
            student_id: self.student_id,
            kind: self.kind,
            answer: self.answer,
            status: self.status,
            flagged: self.flagged,
            reported_at: self.reported_at,
            recorded_at,
        }
    }
}

/// DTO for `POST /tab_switch`.
#[derive(Debug, Deserialize, Validate)]
pub struct TabSwitchRequest {
    #[validate(length(min = 1, max = 100, message = "student_id must not be empty."))]
    pub student_id: String,
}

/// DTO for `POST /face_detection_status`.
#[derive(Debug, Deserialize, Validate)]
pub struct FaceDetectionRequest {
    #[validate(length(min = 1, max = 100, message = "username must not be empty."))]
    pub username: String,
    pub status: String,
    /// Client clock reading. Any shape is accepted; see [`Self::reported_at`].
    pub timestamp: Option<Value>,
}

impl FaceDetectionRequest {
    /// Best-effort parse of the client timestamp.
    ///
    /// Accepts RFC 3339, naive ISO-8601 (taken as UTC) and epoch milliseconds.
    /// Anything else yields `None`; the event is still recorded.
    pub fn reported_at(&self) -> Option<DateTime<Utc>> {
        match self.timestamp.as_ref()? {
            Value::String(raw) => parse_client_timestamp(raw),
            Value::Number(millis) => millis
                .as_i64()
                .or_else(|| millis.as_f64().map(|f| f as i64))
                .and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }
}

fn parse_client_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// DTO for `POST /submit_answer`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 100, message = "student_id must not be empty."))]
    pub student_id: String,
    pub answer: String,
}

/// Query string for `GET /logs`.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub status: String,
    pub suspicious: bool,
}
