use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use super::{applications, health, jobs, meta};

#[derive(OpenApi)]
#[openapi(
    info(title = "Hiring backend", description = "Jobs, configurable application forms and applications"),
    paths(
        health::health,
        meta::list_form_fields,
        meta::list_job_types,
        meta::list_departments,
        jobs::list_active_jobs,
        jobs::get_active_job,
        jobs::get_application_form,
        applications::submit_application,
        applications::check_applied,
        applications::my_applications,
        jobs::create_job,
        jobs::list_jobs,
        jobs::get_job,
        jobs::update_job,
        jobs::delete_job,
        jobs::replace_form_config,
        applications::list_applications,
        applications::get_application,
        applications::update_application_status,
        applications::dashboard_stats,
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
