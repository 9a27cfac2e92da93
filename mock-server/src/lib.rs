//! In-memory stand-in for the campaign-planning REST backend.
//!
//! Serves every collection under `/api/<resource>/` with paginated list,
//! retrieve, create, replace, partial update and delete, plus the
//! `/api/health` and `/api/schema-lite` operational endpoints. Error bodies
//! use the backend's problem-document shape. Individual collections can be
//! switched into a failing mode to exercise partial page loads.

pub mod error;
pub mod schema;
pub mod seed;
pub mod store;

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

pub use error::AppError;
use schema::{ResourceSpec, RESOURCES};
use store::{ListParams, Store};

pub const SERVICE: &str = "ddash-backend";
pub const VERSION: &str = concat!("mock-", env!("CARGO_PKG_VERSION"));

/// Shared state behind the router.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
    failing: Arc<RwLock<HashSet<String>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-filled with the demo data set.
    pub fn seeded() -> Result<Self, AppError> {
        let mut store = Store::new();
        seed::seed(&mut store)?;
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            failing: Arc::default(),
        })
    }

    pub fn store(&self) -> &Arc<RwLock<Store>> {
        &self.store
    }

    /// Make every request to `slug` answer 500 until [`AppState::heal`].
    pub async fn fail(&self, slug: &str) {
        self.failing.write().await.insert(slug.to_string());
    }

    pub async fn heal(&self, slug: &str) {
        self.failing.write().await.remove(slug);
    }

    async fn resource(&self, slug: &str) -> Result<&'static ResourceSpec, AppError> {
        let spec = schema::lookup(slug).ok_or(AppError::NotFound)?;
        if self.failing.read().await.contains(slug) {
            return Err(AppError::Injected);
        }
        Ok(spec)
    }
}

pub fn app() -> Router {
    app_with_state(AppState::new())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/schema-lite", get(schema_lite))
        .route("/api/{resource}/", get(list).post(create))
        .route(
            "/api/{resource}/{id}/",
            get(retrieve).put(replace).patch(update).delete(destroy),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, AppState::new()).await
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub service: &'static str,
    pub time: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub pattern: String,
    pub lookup: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SchemaLite {
    pub service: &'static str,
    pub count: usize,
    pub endpoints: Vec<Endpoint>,
}

async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        service: SERVICE,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        version: VERSION,
    })
}

/// Two routes per collection, in the backend's router naming.
pub fn endpoints() -> Vec<Endpoint> {
    RESOURCES
        .iter()
        .flat_map(|r| {
            [
                Endpoint {
                    name: format!("{}-list", r.basename),
                    pattern: format!("^api/{}/$", r.slug),
                    lookup: None,
                },
                Endpoint {
                    name: format!("{}-detail", r.basename),
                    pattern: format!("^api/{}/(?P<pk>[^/.]+)/$", r.slug),
                    lookup: Some("pk"),
                },
            ]
        })
        .collect()
}

async fn schema_lite() -> Json<SchemaLite> {
    let endpoints = endpoints();
    Json(SchemaLite {
        service: SERVICE,
        count: endpoints.len(),
        endpoints,
    })
}

fn parse_page_number(raw: Option<&String>) -> Result<Option<usize>, AppError> {
    raw.map(|s| s.parse::<usize>().map_err(|_| AppError::NotFound))
        .transpose()
}

/// Link to another page of the same listing, keeping the other parameters.
fn page_link(slug: &str, query: &BTreeMap<String, String>, page: usize) -> String {
    let mut query = query.clone();
    if page == 1 {
        query.remove("page");
    } else {
        query.insert("page".into(), page.to_string());
    }
    if query.is_empty() {
        return format!("/api/{slug}/");
    }
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&query)
        .finish();
    format!("/api/{slug}/?{encoded}")
}

async fn list(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let spec = state.resource(&resource).await?;
    let params = ListParams {
        search: query.get("search").cloned(),
        ordering: query.get("ordering").cloned().filter(|o| !o.is_empty()),
        page: parse_page_number(query.get("page"))?,
        page_size: parse_page_number(query.get("page_size"))?,
    };
    let page = state.store.read().await.list(spec, &params)?;
    let next = page
        .has_next()
        .then(|| page_link(spec.slug, &query, page.page + 1));
    let previous = page
        .has_previous()
        .then(|| page_link(spec.slug, &query, page.page - 1));
    Ok(Json(json!({
        "count": page.count,
        "next": next,
        "previous": previous,
        "results": page.results,
    })))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

fn parse_body(body: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Parse(e.to_string()))
}

async fn retrieve(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let spec = state.resource(&resource).await?;
    let id = parse_id(&id)?;
    Ok(Json(state.store.read().await.get(spec, id)?))
}

async fn create(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let spec = state.resource(&resource).await?;
    let input = parse_body(&body)?;
    let record = state.store.write().await.create(spec, input)?;
    info!(resource = spec.slug, id = %record["id"], "created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn replace(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let spec = state.resource(&resource).await?;
    let id = parse_id(&id)?;
    let input = parse_body(&body)?;
    let record = state.store.write().await.replace(spec, id, input)?;
    info!(resource = spec.slug, %id, "replaced");
    Ok(Json(record))
}

async fn update(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let spec = state.resource(&resource).await?;
    let id = parse_id(&id)?;
    let input = parse_body(&body)?;
    let record = state.store.write().await.update(spec, id, input)?;
    info!(resource = spec.slug, %id, "updated");
    Ok(Json(record))
}

async fn destroy(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let spec = state.resource(&resource).await?;
    let id = parse_id(&id)?;
    state.store.write().await.delete(spec, id)?;
    info!(resource = spec.slug, %id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}
