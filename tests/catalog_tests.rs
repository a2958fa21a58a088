// tests/catalog_tests.rs

use quiz_proctor::{catalog::QuestionCatalog, error::AppError};
use std::path::PathBuf;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("catalog_{}.json", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn repeated_reads_are_byte_identical() {
    let path = temp_path();
    let document = "[{\"id\": 1, \"question\": \"Q?\", \"options\": [\"a\", \"b\"], \"correct\": 0}]\n";
    std::fs::write(&path, document).unwrap();

    let catalog = QuestionCatalog::new(&path);
    let first = catalog.get_questions().await.unwrap();
    let second = catalog.get_questions().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.as_ref(), document.as_bytes());

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn missing_file_is_not_found_until_it_appears() {
    let path = temp_path();
    let catalog = QuestionCatalog::new(&path);

    assert!(matches!(
        catalog.get_questions().await,
        Err(AppError::NotFound(_))
    ));

    std::fs::write(&path, "[]").unwrap();
    assert_eq!(catalog.get_questions().await.unwrap().as_ref(), b"[]");

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn loaded_document_outlives_file_removal() {
    let path = temp_path();
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let catalog = QuestionCatalog::new(&path);
    let before = catalog.get_questions().await.unwrap();
    std::fs::remove_file(&path).unwrap();
    let after = catalog.get_questions().await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn invalid_json_is_internal_error() {
    let path = temp_path();
    std::fs::write(&path, "{ not json").unwrap();

    let catalog = QuestionCatalog::new(&path);
    assert!(matches!(
        catalog.get_questions().await,
        Err(AppError::InternalServerError(_))
    ));

    let _ = std::fs::remove_file(path);
}
