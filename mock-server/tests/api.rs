use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create_field(app: &Router, name: &str) -> Value {
    let resp = send(app, json_request("POST", "/api/fields/", &json!({"name": name}).to_string())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- operational ---

#[tokio::test]
async fn health_reports_service() {
    let resp = app().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "ddash-backend");
    assert!(body["time"].is_string());
}

#[tokio::test]
async fn schema_lite_lists_every_route() {
    let resp = app().oneshot(get("/api/schema-lite")).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["count"], 20);
    let names: Vec<&str> = body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"maintenancewindow-list"));
    assert!(names.contains(&"calcrun-detail"));
}

// --- list ---

#[tokio::test]
async fn list_empty_collection() {
    let resp = app().oneshot(get("/api/rigs/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"count": 0, "next": null, "previous": null, "results": []})
    );
}

#[tokio::test]
async fn list_paginates_with_links() {
    let app = app();
    for name in ["A", "B", "C"] {
        create_field(&app, name).await;
    }
    let body = body_json(send(&app, get("/api/fields/?page_size=2")).await).await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], "/api/fields/?page=2&page_size=2");
    assert_eq!(body["previous"], Value::Null);

    let body = body_json(send(&app, get("/api/fields/?page=2&page_size=2")).await).await;
    assert_eq!(body["results"][0]["name"], "C");
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], "/api/fields/?page_size=2");
}

#[tokio::test]
async fn list_search_filters_by_name() {
    let app = app();
    create_field(&app, "Brage").await;
    create_field(&app, "Gina Krog").await;
    let body = body_json(send(&app, get("/api/fields/?search=krog")).await).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Gina Krog");
}

#[tokio::test]
async fn invalid_page_is_not_found() {
    let resp = app().oneshot(get("/api/fields/?page=9")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_collection_is_not_found() {
    let resp = app().oneshot(get("/api/users/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"detail": "Not found."}));
}

// --- create ---

#[tokio::test]
async fn create_returns_201_with_server_fields() {
    let body = create_field(&app(), "Brage").await;
    assert_eq!(body["name"], "Brage");
    assert!(body["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn create_validation_failure_returns_problem() {
    let resp = app()
        .oneshot(json_request("POST", "/api/fields/", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({
            "detail": "Validation failed.",
            "code": "invalid",
            "fields": {"name": ["This field is required."]}
        })
    );
}

#[tokio::test]
async fn create_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/fields/", "{not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "parse_error");
    assert!(body["detail"].as_str().unwrap().starts_with("JSON parse error"));
}

// --- retrieve / update / delete ---

#[tokio::test]
async fn retrieve_unknown_and_malformed_ids_are_not_found() {
    let app = app();
    let resp = send(&app, get("/api/fields/00000000-0000-0000-0000-000000000000/")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&app, get("/api/fields/not-a-uuid/")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();
    let created = create_field(&app, "Old").await;
    let uri = format!("/api/fields/{}/", created["id"].as_str().unwrap());

    let resp = send(&app, json_request("PUT", &uri, r#"{"name":"New"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["name"], "New");

    let resp = send(&app, json_request("PATCH", &uri, r#"{"name":"Newer"}"#)).await;
    assert_eq!(body_json(resp).await["name"], "Newer");

    let resp = send(&app, get(&uri)).await;
    let fetched = body_json(resp).await;
    assert_eq!(fetched["name"], "Newer");
    assert_eq!(fetched["created_at"], created["created_at"]);

    let resp = send(
        &app,
        Request::builder().method("DELETE").uri(&uri).body(String::new()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = send(&app, get(&uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn campaign_rules_are_enforced_over_http() {
    let state = AppState::seeded().unwrap();
    let app = app_with_state(state.clone());
    let scenarios = body_json(send(&app, get("/api/scenarios/")).await).await;
    let scenario = &scenarios["results"][0]["id"];
    let body = json!({"scenario": scenario, "name": "No rig", "campaign_type": "rig_campaign"});
    let resp = send(&app, json_request("POST", "/api/campaigns/", &body.to_string())).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["fields"]["rig"],
        json!(["Rig campaign requires a rig."])
    );
    assert_eq!(state.store().read().await.len("campaigns"), 2);
}

// --- fault injection ---

#[tokio::test]
async fn failing_collection_answers_500() {
    let state = AppState::seeded().unwrap();
    state.fail("rigs").await;
    let app = app_with_state(state.clone());

    let resp = send(&app, get("/api/rigs/")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({"error": "injected failure"}));

    let resp = send(&app, get("/api/fields/")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    state.heal("rigs").await;
    let resp = send(&app, get("/api/rigs/")).await;
    assert_eq!(body_json(resp).await["count"], 3);
}
