//! Error responses in the backend's problem-document shape.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Per-field validation messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// 404 `{"detail": "Not found."}`
    NotFound,
    /// 400 with per-field messages.
    Validation(FieldErrors),
    /// 400 for a body that is not JSON at all.
    Parse(String),
    /// 500 produced by fault injection.
    Injected,
}

impl AppError {
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(name.to_string(), vec![message.into()]);
        AppError::Validation(fields)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Parse(_) => StatusCode::BAD_REQUEST,
            AppError::Injected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound => json!({"detail": "Not found."}),
            AppError::Validation(fields) => json!({
                "detail": "Validation failed.",
                "code": "invalid",
                "fields": fields,
            }),
            AppError::Parse(message) => json!({
                "detail": format!("JSON parse error - {message}"),
                "code": "parse_error",
            }),
            AppError::Injected => json!({"error": "injected failure"}),
        };
        (status, Json(body)).into_response()
    }
}
