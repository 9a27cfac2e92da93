//! Request building, dispatch and response normalization for the REST API.
//!
//! # Design
//! `ApiClient` holds only configuration and a shared `Transport`. Every call
//! is split into `build_request` (URL resolution, header merging, JSON body)
//! and `parse_response` (content-type sniffing, error normalization), with
//! the transport executing the round-trip in between. Both halves are public
//! so they can be tested without a network.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{merge_header, ClientConfig};
use crate::error::{ApiError, HttpError};
use crate::http::{query_string, Credentials, HttpMethod, HttpRequest, HttpResponse};
use crate::problem::ApiProblem;
use crate::transport::{ReqwestTransport, Transport};

/// Per-call overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub credentials: Option<Credentials>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn credentials(mut self, mode: Credentials) -> Self {
        self.credentials = Some(mode);
        self
    }

    /// Attach a JSON body. Only POST, PUT and PATCH send it.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Serialization)?);
        Ok(self)
    }
}

/// A decoded successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The response advertised JSON and parsed.
    Json(Value),
    /// The response was not JSON.
    Text(String),
    /// The body could not be decoded.
    Null,
}

impl Payload {
    fn into_value(self) -> Value {
        match self {
            Payload::Json(v) => v,
            Payload::Text(s) => Value::String(s),
            Payload::Null => Value::Null,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Client that talks to the network through reqwest.
    pub fn with_reqwest(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new().map_err(|e| ApiError::Transport {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::new(config, transport))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute `http(s)` URLs pass through; anything else is joined onto
    /// the base URL with exactly one slash.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.config.base_url)
        } else {
            format!("{}/{path}", self.config.base_url)
        }
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = self.config.headers.clone();
        for (name, value) in &options.headers {
            validate_header_name(name)?;
            merge_header(&mut headers, name.clone(), value.clone());
        }

        let body = match (&options.body, method.is_mutating()) {
            (Some(body), true) => Some(serde_json::to_string(body).map_err(ApiError::Serialization)?),
            _ => None,
        };

        Ok(HttpRequest {
            method,
            url: format!("{}{}", self.resolve_url(path), query_string(&options.query)),
            headers,
            body,
            credentials: self.config.credentials.or(options.credentials),
        })
    }

    /// Normalize a response: non-2xx becomes `HttpError`, a body that fails
    /// to decode becomes `Payload::Null`.
    pub fn parse_response(url: &str, response: HttpResponse) -> Result<Payload, ApiError> {
        let success = response.is_success();
        let is_json = response.content_type().contains("application/json");
        let payload = if is_json {
            serde_json::from_str::<Value>(&response.body)
                .map(Payload::Json)
                .unwrap_or(Payload::Null)
        } else {
            Payload::Text(response.body)
        };

        if success {
            return Ok(payload);
        }

        let problem = match payload {
            Payload::Json(value @ Value::Object(_)) => {
                serde_json::from_value::<ApiProblem>(value).ok()
            }
            _ => None,
        };
        Err(HttpError::new(response.status, response.status_text, url, problem).into())
    }

    /// Execute one request and return the raw payload.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Payload, ApiError> {
        let request = self.build_request(method, path, options)?;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;
        debug!(%method, %url, status = response.status, "received response");

        Self::parse_response(&url, response)
    }

    /// Execute one request and decode the payload as `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let payload = self.send(method, path, options).await?;
        serde_json::from_value(payload.into_value()).map_err(|source| ApiError::Decode {
            url: self.resolve_url(path),
            source,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, &RequestOptions::new()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, options).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new().json(body)?;
        self.request(HttpMethod::Post, path, &options).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new().json(body)?;
        self.request(HttpMethod::Put, path, &options).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new().json(body)?;
        self.request(HttpMethod::Patch, path, &options).await
    }

    /// DELETE; whatever body comes back is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(HttpMethod::Delete, path, &RequestOptions::new()).await?;
        Ok(())
    }
}

fn validate_header_name(name: &str) -> Result<(), ApiError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && b != b':');
    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidHeader(name.to_string()))
    }
}
