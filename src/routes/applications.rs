use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplicationListResponse, ApplicationResponse,
        DashboardStatsResponse, HasAppliedQuery, HasAppliedResponse, SubmitApplicationPayload,
        UpdateStatusPayload,
    },
    error::{Error, Result},
    models::user::CurrentUser,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/applications",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Application stored with status applied", body = ApplicationResponse),
        (status = 400, description = "Job no longer accepts applications"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied for this job"),
        (status = 422, description = "Per-field validation messages")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.submit(id, payload).await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/applications/check",
    params(
        ("id" = Uuid, Path, description = "Job ID"),
        ("email" = String, Query, description = "Email to look up")
    ),
    responses(
        (status = 200, description = "Whether this email already applied", body = HasAppliedResponse)
    )
)]
#[axum::debug_handler]
pub async fn check_applied(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<HasAppliedQuery>,
) -> Result<impl IntoResponse> {
    let applied = state.application_service.has_applied(id, &query.email).await?;
    Ok(Json(HasAppliedResponse { applied }))
}

#[utoipa::path(
    get,
    path = "/api/me/applications",
    responses(
        (status = 200, description = "Applications submitted with the caller's email"),
        (status = 400, description = "Token carries no email")
    )
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let email = user
        .email
        .ok_or_else(|| Error::BadRequest("Token carries no email".to_string()))?;
    let items: Vec<ApplicationResponse> = state
        .application_service
        .list_for_email(&email)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/admin/applications",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("job_id" = Option<Uuid>, Query, description = "Filter by job"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("search" = Option<String>, Query, description = "Search in name and email"),
        ("sort" = Option<String>, Query, description = "created_at | applicant_name | email | status"),
        ("direction" = Option<String>, Query, description = "asc | desc")
    ),
    responses(
        (status = 200, description = "Applications", body = ApplicationListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.application_service.list(query).await?;
    Ok(Json(ApplicationListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/admin/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = ApplicationResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get(id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/api/admin/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = ApplicationResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard/stats",
    responses(
        (status = 200, description = "Job and application counters", body = DashboardStatsResponse)
    )
)]
#[axum::debug_handler]
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.application_service.dashboard_stats().await?;
    Ok(Json(DashboardStatsResponse::from(stats)))
}
