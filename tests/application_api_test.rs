mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{admin_token, app, applicant_token, create_job, frontend_job, send};

#[tokio::test]
async fn valid_submission_is_stored_as_applied() {
    let app = app();
    let job_id = create_job(&app, frontend_job()).await;
    let applicant = applicant_token("jane@example.com");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", job_id),
        Some(&applicant),
        Some(json!({
            "applicant_name": "  Jane Doe ",
            "email": "Jane@Example.com",
            "phone": "+62 812-3456-789",
            "linkedin": "",
            "cover_letter": "should never be stored",
            "favourite_colour": "green"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["status"], json!("applied"));
    assert_eq!(body["applicant_name"], json!("Jane Doe"));
    assert_eq!(body["email"], json!("jane@example.com"));
    assert!(body["reference"].as_str().unwrap().starts_with("APP-"));
    assert_eq!(body["form_data"], json!({ "phone": "+62 812-3456-789" }));
    assert!(body["photo_url"].is_null());
}

#[tokio::test]
async fn short_phone_is_reported_on_its_field() {
    let app = app();
    let job_id = create_job(&app, frontend_job()).await;
    let applicant = applicant_token("jane@example.com");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", job_id),
        Some(&applicant),
        Some(json!({
            "applicant_name": "J",
            "email": "not-an-email",
            "phone": "123",
            "linkedin": "linkedin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("validation_failed"));
    assert_eq!(body["fields"]["phone"], json!("Phone number must be at least 8 digits"));
    assert_eq!(body["fields"]["applicant_name"], json!("Name must be at least 2 characters"));
    assert_eq!(body["fields"]["email"], json!("Please enter a valid email address"));
    assert_eq!(body["fields"]["linkedin"], json!("Please enter a valid URL"));

    let (_, list) = send(&app, "GET", "/api/admin/applications", Some(&admin_token()), None).await;
    assert_eq!(list["total"], json!(0));
}

#[tokio::test]
async fn second_submission_for_same_email_conflicts() {
    let app = app();
    let job_id = create_job(&app, frontend_job()).await;
    let applicant = applicant_token("jane@example.com");
    let uri = format!("/api/jobs/{}/applications", job_id);
    let submission = json!({
        "applicant_name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "08123456789"
    });

    let (status, _) = send(&app, "POST", &uri, Some(&applicant), Some(submission)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(&applicant),
        Some(json!({
            "applicant_name": "Jane D.",
            "email": " JANE@example.com ",
            "phone": "08123456789"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("already_applied"));
    assert_eq!(body["message"], json!("You have already applied for this job."));

    let (status, check) = send(
        &app,
        "GET",
        &format!("/api/jobs/{}/applications/check?email=Jane@example.com", job_id),
        Some(&applicant),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["applied"], json!(true));

    let (_, list) = send(
        &app,
        "GET",
        &format!("/api/admin/applications?job_id={}", job_id),
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(list["total"], json!(1));
}

#[tokio::test]
async fn same_email_may_apply_to_different_jobs() {
    let app = app();
    let first = create_job(&app, frontend_job()).await;
    let second = create_job(&app, json!({ "title": "Designer", "form_configs": [] })).await;
    let applicant = applicant_token("jane@example.com");
    let submission = json!({
        "applicant_name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "08123456789"
    });

    for job_id in [&first, &second] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/jobs/{}/applications", job_id),
            Some(&applicant),
            Some(submission.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, mine) = send(&app, "GET", "/api/me/applications", Some(&applicant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn inactive_job_refuses_applications() {
    let app = app();
    let admin = admin_token();
    let job_id = create_job(&app, frontend_job()).await;

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/admin/jobs/{}", job_id),
        Some(&admin),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", job_id),
        Some(&applicant_token("jane@example.com")),
        Some(json!({
            "applicant_name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "08123456789"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/api/admin/applications", Some(&admin), None).await;
    assert_eq!(list["total"], json!(0));
}

#[tokio::test]
async fn full_time_jobs_require_a_photo() {
    let app = app();
    // No job_type in the payload: full-time is the default.
    let job_id = create_job(
        &app,
        json!({
            "title": "Receptionist",
            "form_configs": [ { "field_name": "photo", "requirement": "optional" } ]
        }),
    )
    .await;
    let applicant = applicant_token("sam@example.com");

    let (_, form) = send(
        &app,
        "GET",
        &format!("/api/jobs/{}/form", job_id),
        Some(&applicant),
        None,
    )
    .await;
    assert_eq!(form["job_type"], json!("fulltime"));
    assert_eq!(form["fields"][0]["name"], json!("photo"));
    assert_eq!(form["fields"][0]["required"], json!(true));

    let uri = format!("/api/jobs/{}/applications", job_id);
    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(&applicant),
        Some(json!({ "applicant_name": "Sam Lee", "email": "sam@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["photo"], json!("Photo is required"));

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(&applicant),
        Some(json!({
            "applicant_name": "Sam Lee",
            "email": "sam@example.com",
            "photo": "https://cdn.example.com/captures/sam.jpg"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["photo_url"], json!("https://cdn.example.com/captures/sam.jpg"));
}

#[tokio::test]
async fn intern_jobs_keep_photo_optional() {
    let app = app();
    let job_id = create_job(
        &app,
        json!({
            "title": "Summer Intern",
            "job_type": "intern",
            "form_configs": [ { "field_name": "photo", "requirement": "optional" } ]
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", job_id),
        Some(&applicant_token("kim@example.com")),
        Some(json!({ "applicant_name": "Kim Park", "email": "kim@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body["photo_url"].is_null());
}

#[tokio::test]
async fn admin_moves_status_freely_and_stats_follow() {
    let app = app();
    let admin = admin_token();
    let job_id = create_job(&app, frontend_job()).await;

    let (_, application) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", job_id),
        Some(&applicant_token("jane@example.com")),
        Some(json!({
            "applicant_name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "08123456789"
        })),
    )
    .await;
    let id = application["id"].as_str().unwrap();
    let status_uri = format!("/api/admin/applications/{}/status", id);

    for next in ["hired", "applied", "rejected"] {
        let (status, body) = send(
            &app,
            "POST",
            &status_uri,
            Some(&admin),
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!(next));
    }

    let (status, stats) = send(&app, "GET", "/api/admin/dashboard/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_jobs"], json!(1));
    assert_eq!(stats["active_jobs"], json!(1));
    assert_eq!(stats["total_applications"], json!(1));
    let rejected = stats["by_status"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["status"] == json!("rejected"))
        .unwrap();
    assert_eq!(rejected["count"], json!(1));

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/admin/applications/{}/status", uuid::Uuid::new_v4()),
        Some(&admin),
        Some(json!({ "status": "hired" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", uuid::Uuid::new_v4()),
        Some(&applicant_token("jane@example.com")),
        Some(json!({ "applicant_name": "Jane Doe", "email": "jane@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
