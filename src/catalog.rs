// src/catalog.rs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tokio::sync::OnceCell;

use crate::error::AppError;

/// Read-only question document, loaded from disk on first access.
///
/// The raw bytes are cached and served unchanged on every later call, even if
/// the file is removed afterwards. A missing file is not cached, so a later
/// call retries the load.
#[derive(Debug)]
pub struct QuestionCatalog {
    path: PathBuf,
    document: OnceCell<Bytes>,
}

impl QuestionCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_questions(&self) -> Result<Bytes, AppError> {
        self.document
            .get_or_try_init(|| load_document(&self.path))
            .await
            .cloned()
    }
}

async fn load_document(path: &Path) -> Result<Bytes, AppError> {
    let raw = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::NotFound("Questions file not found".to_string()),
        _ => AppError::InternalServerError(format!("failed to read {}: {e}", path.display())),
    })?;

    let parsed: serde_json::Value = serde_json::from_slice(&raw).map_err(|e| {
        AppError::InternalServerError(format!("{} is not valid JSON: {e}", path.display()))
    })?;

    match parsed.as_array() {
        Some(questions) => tracing::info!(
            path = %path.display(),
            count = questions.len(),
            "Question catalog loaded"
        ),
        None => tracing::info!(path = %path.display(), "Question catalog loaded"),
    }

    Ok(Bytes::from(raw))
}
