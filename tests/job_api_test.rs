mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{admin_token, app, applicant_token, create_job, frontend_job, send};

#[tokio::test]
async fn admin_creates_job_and_applicant_sees_visible_fields() {
    let app = app();
    let job_id = create_job(&app, frontend_job()).await;
    let applicant = applicant_token("jane@example.com");

    let (status, form) = send(
        &app,
        "GET",
        &format!("/api/jobs/{}/form", job_id),
        Some(&applicant),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let fields = form["fields"].as_array().unwrap();
    let names: Vec<&str> = fields.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["phone", "linkedin"]);
    assert_eq!(fields[0]["required"], json!(true));
    assert_eq!(fields[0]["type"], json!("phone"));
    assert_eq!(fields[1]["required"], json!(false));
}

#[tokio::test]
async fn replacing_form_config_drops_previous_rows() {
    let app = app();
    let job_id = create_job(&app, frontend_job()).await;
    let admin = admin_token();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/admin/jobs/{}/form-config", job_id),
        Some(&admin),
        Some(json!({ "form_configs": [ { "field_name": "phone", "requirement": "optional" } ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form_configs"].as_array().unwrap().len(), 1);

    let (_, job) = send(&app, "GET", &format!("/api/admin/jobs/{}", job_id), Some(&admin), None).await;
    let configs = job["form_configs"].as_array().unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0]["field_name"], json!("phone"));
    assert_eq!(configs[0]["requirement"], json!("optional"));
}

#[tokio::test]
async fn duplicated_field_in_config_is_rejected() {
    let app = app();
    let job_id = create_job(&app, frontend_job()).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/admin/jobs/{}/form-config", job_id),
        Some(&admin_token()),
        Some(json!({ "form_configs": [
            { "field_name": "phone", "requirement": "optional" },
            { "field_name": "phone", "requirement": "mandatory" }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/jobs",
        Some(&admin_token()),
        Some(json!({
            "title": "Ops",
            "form_configs": [
                { "field_name": "gender", "requirement": "optional" },
                { "field_name": "gender", "requirement": "hidden" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_title_fails_payload_validation() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/jobs",
        Some(&admin_token()),
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_check_token_and_role() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/admin/jobs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("missing_authorization"));

    let (status, _) = send(&app, "GET", "/api/admin/jobs", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let applicant = applicant_token("jane@example.com");
    let (status, body) = send(&app, "GET", "/api/admin/jobs", Some(&applicant), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("forbidden"));

    let (status, _) = send(&app, "GET", "/api/jobs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn inactive_jobs_are_hidden_from_applicants() {
    let app = app();
    let admin = admin_token();
    let active_id = create_job(&app, frontend_job()).await;
    let inactive_id = create_job(
        &app,
        json!({ "title": "Archived role", "is_active": false, "form_configs": [] }),
    )
    .await;
    let applicant = applicant_token("jane@example.com");

    let (status, list) = send(&app, "GET", "/api/jobs", Some(&applicant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], json!(1));
    assert_eq!(list["items"][0]["id"], json!(active_id));

    let (status, _) = send(&app, "GET", &format!("/api/jobs/{}", inactive_id), Some(&applicant), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = send(&app, "GET", "/api/admin/jobs?is_active=false", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], json!(1));
    assert_eq!(list["items"][0]["id"], json!(inactive_id));
}

#[tokio::test]
async fn patch_keeps_untouched_columns_and_delete_removes_job() {
    let app = app();
    let admin = admin_token();
    let job_id = create_job(&app, frontend_job()).await;

    let (status, job) = send(
        &app,
        "PATCH",
        &format!("/api/admin/jobs/{}", job_id),
        Some(&admin),
        Some(json!({ "salary_range": "$100k" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["title"], json!("Senior Frontend Developer"));
    assert_eq!(job["salary_range"], json!("$100k"));
    assert_eq!(job["form_configs"].as_array().unwrap().len(), 3);

    let (status, _) = send(&app, "DELETE", &format!("/api/admin/jobs/{}", job_id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/admin/jobs/{}", job_id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metadata_and_health_are_public() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], json!("memory"));

    let (status, body) = send(&app, "GET", "/api/meta/form-fields", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);

    let (status, body) = send(&app, "GET", "/api/meta/job-types", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let forcing: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["capture_mandatory"] == json!(true))
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(forcing, vec!["fulltime"]);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = send(&app, "GET", "/api/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/jobs/{id}/applications"].is_object());
}

#[tokio::test]
async fn malformed_job_body_is_rejected_before_the_handler() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/admin/jobs")
        .header("authorization", format!("Bearer {}", admin_token()))
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": \"Ops\",,}"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/api/admin/jobs", Some(&admin_token()), None).await;
    assert_eq!(list["total"], json!(0));
}
