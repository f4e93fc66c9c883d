mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use mockall::{
    mock,
    predicate::{always, eq},
};
use serde_json::json;
use uuid::Uuid;

use common::{admin_token, app_with_state, applicant_token, auth_settings, send};
use hiring_backend::{
    database::{ApplicationRepository, InMemoryStore, JobRepository, Page},
    error::{Error, Result},
    models::{
        application::{
            Application, ApplicationFilter, ApplicationStatus, NewApplication, StatusCount,
        },
        form_config::{FieldRequirement, FormFieldConfig},
        job::{JobType, NewJob},
    },
    AppState, StoreKind,
};

mock! {
    pub Applications {}

    #[async_trait]
    impl ApplicationRepository for Applications {
        async fn create(&self, application: NewApplication) -> Result<Application>;
        async fn find_by_job_and_email(&self, job_id: Uuid, email: &str) -> Result<Option<Application>>;
        async fn get(&self, id: Uuid) -> Result<Option<Application>>;
        async fn list(&self, filter: &ApplicationFilter) -> Result<Page<Application>>;
        async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Option<Application>>;
        async fn status_counts(&self) -> Result<Vec<StatusCount>>;
    }
}

async fn seeded_jobs() -> (Arc<InMemoryStore>, Uuid) {
    let jobs = Arc::new(InMemoryStore::new());
    let job = JobRepository::create(
        jobs.as_ref(),
        NewJob {
            title: "Support Engineer".to_string(),
            description: None,
            department: Some("Customer Support".to_string()),
            salary_range: None,
            job_type: JobType::FullTime,
            is_active: true,
        },
        vec![FormFieldConfig::new("phone", FieldRequirement::Optional)],
    )
    .await
    .unwrap();
    (jobs, job.id)
}

#[tokio::test]
async fn failed_insert_is_reported_as_retryable() {
    let (jobs, job_id) = seeded_jobs().await;

    let mut applications = MockApplications::new();
    applications
        .expect_find_by_job_and_email()
        .withf(move |id, email| *id == job_id && email == "jane@example.com")
        .times(1)
        .returning(|_, _| Ok(None));
    applications
        .expect_create()
        .times(1)
        .returning(|_| Err(Error::Database(sqlx::Error::PoolTimedOut)));

    let state = AppState::new(jobs, Arc::new(applications), auth_settings(), StoreKind::Memory);
    let app = app_with_state(state);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", job_id),
        Some(&applicant_token("jane@example.com")),
        Some(json!({ "applicant_name": "Jane Doe", "email": "jane@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["retryable"], json!(true));
}

#[tokio::test]
async fn store_level_duplicate_still_conflicts() {
    let (jobs, job_id) = seeded_jobs().await;

    // The advisory lookup misses, the store's unique key catches the race.
    let mut applications = MockApplications::new();
    applications
        .expect_find_by_job_and_email()
        .returning(|_, _| Ok(None));
    applications
        .expect_create()
        .times(1)
        .returning(|_| Err(Error::AlreadyApplied));

    let state = AppState::new(jobs, Arc::new(applications), auth_settings(), StoreKind::Memory);
    let app = app_with_state(state);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/jobs/{}/applications", job_id),
        Some(&applicant_token("jane@example.com")),
        Some(json!({ "applicant_name": "Jane Doe", "email": "jane@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("already_applied"));
}

#[tokio::test]
async fn stats_failure_is_reported_as_retryable() {
    let (jobs, _) = seeded_jobs().await;

    let mut applications = MockApplications::new();
    applications
        .expect_status_counts()
        .times(1)
        .returning(|| Err(Error::Database(sqlx::Error::PoolClosed)));
    applications
        .expect_update_status()
        .with(always(), eq(ApplicationStatus::Hired))
        .returning(|_, _| Ok(None));

    let state = AppState::new(jobs, Arc::new(applications), auth_settings(), StoreKind::Memory);
    let app = app_with_state(state);
    let admin = admin_token();

    let (status, body) = send(&app, "GET", "/api/admin/dashboard/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["retryable"], json!(true));

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/admin/applications/{}/status", Uuid::new_v4()),
        Some(&admin),
        Some(json!({ "status": "hired" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
