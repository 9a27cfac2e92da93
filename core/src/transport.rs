//! The I/O half of the client: executes an `HttpRequest` over the network.

use async_trait::async_trait;

use crate::http::{Credentials, HttpMethod, HttpRequest, HttpResponse};

/// A failure to obtain any response at all.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes one request and returns the response as data.
///
/// Non-2xx statuses are not errors at this layer; only a failure to get a
/// response is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    anonymous: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError(e.to_string()))?;
        let anonymous = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(Self { client, anonymous })
    }

    fn client_for(&self, credentials: Option<Credentials>) -> &reqwest::Client {
        match credentials {
            Some(Credentials::Omit) => &self.anonymous,
            _ => &self.client,
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client_for(request.credentials)
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        // An unreadable body is treated like an empty one; parsing decides what that means.
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
        })
    }
}
