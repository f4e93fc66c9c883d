#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use hiring_backend::{
    database::InMemoryStore, middleware::auth::AuthSettings, models::user::Role, routes,
    utils::token::issue_access_token, AppState,
};

pub const JWT_SECRET: &str = "test_secret_key";

pub fn auth_settings() -> AuthSettings {
    AuthSettings::new(JWT_SECRET, false)
}

pub fn app_with_state(state: AppState) -> Router {
    routes::router(state, 1000, 1000)
}

pub fn app() -> Router {
    app_with_state(AppState::in_memory(InMemoryStore::new(), auth_settings()))
}

pub fn admin_token() -> String {
    issue_access_token(JWT_SECRET, "admin-1", Role::Admin, None, Duration::hours(1))
        .expect("admin token")
}

pub fn applicant_token(email: &str) -> String {
    issue_access_token(
        JWT_SECRET,
        "applicant-1",
        Role::Applicant,
        Some(email),
        Duration::hours(1),
    )
    .expect("applicant token")
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Creates a job through the admin API and returns its id.
pub async fn create_job(app: &Router, body: JsonValue) -> String {
    let (status, job) = send(app, "POST", "/api/admin/jobs", Some(&admin_token()), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create job: {}", job);
    job["id"].as_str().unwrap().to_string()
}

pub fn frontend_job() -> JsonValue {
    json!({
        "title": "Senior Frontend Developer",
        "department": "Engineering",
        "job_type": "fulltime",
        "form_configs": [
            { "field_name": "phone", "requirement": "mandatory" },
            { "field_name": "linkedin", "requirement": "optional" },
            { "field_name": "cover_letter", "requirement": "hidden" }
        ]
    })
}
