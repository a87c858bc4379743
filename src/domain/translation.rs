use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub endpoint_key: String,
    pub payload: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub body: String,
}

impl TranslationResponse {
    /// Failure shape used when no backend response could be read.
    pub fn unknown_failure(err: impl fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("Unknown failure {}", err),
            duration: 0.0,
            content_type: String::new(),
            body: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
