//! Structured error detail returned by the backend on failed requests.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error envelope sent by the backend alongside a non-2xx status.
///
/// Every key is optional. Keys the client does not know about are kept in
/// `extra` so callers can still inspect them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiProblem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ProblemCode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldMessages>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ApiProblem {
    /// The human-readable summary: `detail`, falling back to `error`.
    pub fn summary(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.error.as_deref().filter(|s| !s.is_empty()))
    }

    /// Validation messages for one field, flattened to a list.
    pub fn field_messages(&self, field: &str) -> Vec<&str> {
        self.fields.get(field).map(FieldMessages::as_list).unwrap_or_default()
    }
}

/// `code` may be a string slug or a numeric code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProblemCode {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProblemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemCode::Number(n) => write!(f, "{n}"),
            ProblemCode::Text(s) => f.write_str(s),
        }
    }
}

/// Validation messages for a field: a single string or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldMessages {
    One(String),
    Many(Vec<String>),
}

impl FieldMessages {
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            FieldMessages::One(s) => vec![s.as_str()],
            FieldMessages::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_envelope() {
        let problem: ApiProblem = serde_json::from_str(
            r#"{"detail":"Validation failed.","code":"invalid",
                "fields":{"name":["This field is required."],"lat":"Exploration well requires lat/lon."},
                "trace_id":"abc"}"#,
        )
        .unwrap();
        assert_eq!(problem.summary(), Some("Validation failed."));
        assert_eq!(problem.code, Some(ProblemCode::Text("invalid".to_string())));
        assert_eq!(problem.field_messages("name"), vec!["This field is required."]);
        assert_eq!(problem.field_messages("lat"), vec!["Exploration well requires lat/lon."]);
        assert!(problem.field_messages("lon").is_empty());
        assert_eq!(problem.extra["trace_id"], "abc");
    }

    #[test]
    fn numeric_code_and_error_fallback() {
        let problem: ApiProblem = serde_json::from_str(r#"{"error":"boom","code":42}"#).unwrap();
        assert_eq!(problem.summary(), Some("boom"));
        assert_eq!(problem.code.unwrap().to_string(), "42");
    }

    #[test]
    fn empty_detail_falls_back_to_error() {
        let problem = ApiProblem {
            detail: Some(String::new()),
            error: Some("upstream down".to_string()),
            ..Default::default()
        };
        assert_eq!(problem.summary(), Some("upstream down"));
    }
}
