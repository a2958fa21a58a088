// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 100))]
    pub username: String,
    #[validate(length(max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,

    /// Bearer token identifying the user on later quiz calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn accepted(token: String) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            token: Some(token),
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            message: "Invalid username or password".to_string(),
            token: None,
        }
    }
}
