//! In-process transport for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};

/// Serves canned responses keyed by URL path (query string ignored) and
/// records every request it sees.
#[derive(Default)]
pub(crate) struct StaticTransport {
    routes: HashMap<String, HttpResponse>,
    pub(crate) seen: Mutex<Vec<HttpRequest>>,
}

impl StaticTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, path: &str, response: HttpResponse) -> Self {
        self.routes.insert(format!("/api{path}"), response);
        self
    }

    /// A paginated list response containing `results`.
    pub(crate) fn list(self, path: &str, results: Vec<Value>) -> Self {
        let body = json!({
            "count": results.len(),
            "next": null,
            "previous": null,
            "results": results,
        });
        self.route(path, HttpResponse::json(200, body.to_string()))
    }

    pub(crate) fn failing(self, path: &str, status: u16) -> Self {
        self.route(path, HttpResponse::json(status, r#"{"error":"injected failure"}"#))
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request.url.split('?').next().unwrap_or_default().to_string();
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request);
        }
        Ok(self
            .routes
            .get(&path)
            .cloned()
            .unwrap_or_else(|| HttpResponse::json(404, r#"{"detail":"Not found."}"#)))
    }
}

#[async_trait]
impl Transport for Arc<StaticTransport> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

pub(crate) fn client(transport: StaticTransport) -> ApiClient {
    ApiClient::new(ClientConfig::new("/api"), transport)
}

pub(crate) const CREATED: &str = "2024-01-01T00:00:00Z";

pub(crate) fn field_json(id: &str, name: &str) -> Value {
    json!({"id": id, "name": name, "created_at": CREATED})
}

pub(crate) fn rig_json(id: &str, name: &str, day_rate: &str) -> Value {
    json!({
        "id": id, "name": name, "rig_kind": "jackup", "day_rate": day_rate,
        "status": "active", "created_at": CREATED
    })
}

pub(crate) fn project_json(id: &str, name: &str, rig: Option<&str>, start: &str, end: &str) -> Value {
    json!({
        "id": id, "name": name, "project_type": "drilling",
        "field": null, "platform": null, "well": null, "rig": rig,
        "status": "planned", "planned_start": start, "planned_end": end,
        "actual_start": null, "actual_end": null,
        "dependencies": {}, "extras": {}, "created_at": CREATED
    })
}
