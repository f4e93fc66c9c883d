use axum::{response::IntoResponse, Json};

use crate::{
    dto::job_dto::{DepartmentsResponse, FormFieldCatalogResponse, JobTypeResponse},
    forms::catalog::AVAILABLE_FORM_FIELDS,
    models::job::{JobType, DEPARTMENTS},
};

#[utoipa::path(
    get,
    path = "/api/meta/form-fields",
    responses(
        (status = 200, description = "Fields an admin can place on a job's form", body = FormFieldCatalogResponse)
    )
)]
pub async fn list_form_fields() -> impl IntoResponse {
    Json(FormFieldCatalogResponse {
        items: AVAILABLE_FORM_FIELDS,
    })
}

#[utoipa::path(
    get,
    path = "/api/meta/job-types",
    responses(
        (status = 200, description = "Job types and whether they force photo capture")
    )
)]
pub async fn list_job_types() -> impl IntoResponse {
    let items: Vec<JobTypeResponse> = JobType::ALL.iter().copied().map(Into::into).collect();
    Json(items)
}

#[utoipa::path(
    get,
    path = "/api/meta/departments",
    responses(
        (status = 200, description = "Known departments", body = DepartmentsResponse)
    )
)]
pub async fn list_departments() -> impl IntoResponse {
    Json(DepartmentsResponse { items: DEPARTMENTS })
}
