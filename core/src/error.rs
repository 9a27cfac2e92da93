//! Error types for the API client.
//!
//! # Design
//! Every non-2xx response becomes one `HttpError`, whatever the status. It
//! carries enough context (status, status text, URL, problem object) for a
//! caller to decide what to show. Transport and (de)serialization failures
//! get their own `ApiError` variants.

use std::fmt;

use crate::problem::ApiProblem;

/// A non-success response from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    pub status: u16,
    pub status_text: String,
    pub url: String,
    pub problem: Option<ApiProblem>,
    message: String,
}

impl HttpError {
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        url: impl Into<String>,
        problem: Option<ApiProblem>,
    ) -> Self {
        let message = Self::default_message(status, problem.as_ref());
        Self {
            status,
            status_text: status_text.into(),
            url: url.into(),
            problem,
            message,
        }
    }

    /// Replace the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn default_message(status: u16, problem: Option<&ApiProblem>) -> String {
        let base = format!("Request failed with status {status}");
        match problem.and_then(ApiProblem::summary) {
            Some(detail) => format!("{base}: {detail}"),
            None => base,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Errors returned by `ApiClient`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed for {url}: {message}")]
    Transport { url: String, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The payload did not have the shape the caller asked for.
    #[error("unexpected payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header {0:?}")]
    InvalidHeader(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn problem(&self) -> Option<&ApiProblem> {
        match self {
            ApiError::Http(e) => e.problem.as_ref(),
            _ => None,
        }
    }
}
