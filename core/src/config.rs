//! Client configuration: base URL, default headers, credentials mode.

use crate::http::Credentials;

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "DDASH_API_BASE";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// JSON content-type and accept headers; the trailing slash of
    /// `base_url` is stripped.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            credentials: None,
        }
    }

    /// Read `DDASH_API_BASE`, falling back to `/api`.
    pub fn from_env() -> Self {
        Self::from_env_or(DEFAULT_BASE_URL)
    }

    /// Read `DDASH_API_BASE`, falling back to `fallback` when it is unset
    /// or blank.
    pub fn from_env_or(fallback: &str) -> Self {
        Self::with_override(std::env::var(BASE_URL_ENV).ok().as_deref(), fallback)
    }

    fn with_override(value: Option<&str>, fallback: &str) -> Self {
        match value.map(str::trim) {
            Some(base) if !base.is_empty() => Self::new(base),
            _ => Self::new(fallback),
        }
    }

    /// Set a default header, replacing any existing header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        merge_header(&mut self.headers, name.into(), value.into());
        self
    }

    pub fn credentials(mut self, mode: Credentials) -> Self {
        self.credentials = Some(mode);
        self
    }
}

/// Insert or replace a header by case-insensitive name.
pub(crate) fn merge_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
        Some(slot) => *slot = (name, value),
        None => headers.push((name, value)),
    }
}
