use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        ApplicationFormResponse, CreateJobPayload, FormConfigResponse, JobListQuery,
        JobListResponse, JobPublicListResponse, JobResponse, ReplaceFormConfigPayload,
        UpdateJobPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/admin/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created successfully", body = JobResponse),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    patch,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated successfully", body = JobResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job, its form config and its applications deleted"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("is_active" = Option<bool>, Query, description = "Filter by active flag"),
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("job_type" = Option<String>, Query, description = "Filter by job type"),
        ("search" = Option<String>, Query, description = "Search in title and department")
    ),
    responses(
        (status = 200, description = "List of jobs", body = JobListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    put,
    path = "/api/admin/jobs/{id}/form-config",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = ReplaceFormConfigPayload,
    responses(
        (status = 200, description = "Form configuration replaced", body = FormConfigResponse),
        (status = 400, description = "A field is configured more than once"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn replace_form_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceFormConfigPayload>,
) -> Result<impl IntoResponse> {
    let form_configs = state
        .job_service
        .replace_form_config(id, payload.form_configs)
        .await?;
    Ok(Json(FormConfigResponse {
        job_id: id,
        form_configs,
    }))
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("job_type" = Option<String>, Query, description = "Filter by job type"),
        ("search" = Option<String>, Query, description = "Search in title and department")
    ),
    responses(
        (status = 200, description = "Active jobs", body = JobPublicListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_active_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list_active(query).await?;
    Ok(Json(JobPublicListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Active job", body = JobResponse),
        (status = 404, description = "Job not found or no longer active")
    )
)]
#[axum::debug_handler]
pub async fn get_active_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_active(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/form",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Visible fields of the job's application form", body = ApplicationFormResponse),
        (status = 404, description = "Job not found or no longer active")
    )
)]
#[axum::debug_handler]
pub async fn get_application_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (job, schema) = state.job_service.application_schema(id).await?;
    Ok(Json(ApplicationFormResponse {
        job_id: job.id,
        title: job.title,
        job_type: job.job_type,
        fields: schema.visible_fields(),
    }))
}
