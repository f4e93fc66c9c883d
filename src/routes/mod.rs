pub mod applications;
pub mod docs;
pub mod health;
pub mod jobs;
pub mod meta;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::middleware::{
    auth::{require_admin, require_user},
    rate_limit::{new_rps_state, rps_middleware},
};
use crate::AppState;

/// Every route of the service. Public, applicant and admin groups are rate
/// limited separately; the two signed-in groups sit behind the JWT gate.
pub fn router(state: AppState, public_rps: u32, app_rps: u32) -> Router {
    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/meta/form-fields", get(meta::list_form_fields))
        .route("/api/meta/job-types", get(meta::list_job_types))
        .route("/api/meta/departments", get(meta::list_departments))
        .route("/api/openapi.json", get(docs::openapi_json))
        .layer(from_fn_with_state(new_rps_state(public_rps), rps_middleware));

    let applicant_api = Router::new()
        .route("/api/jobs", get(jobs::list_active_jobs))
        .route("/api/jobs/:id", get(jobs::get_active_job))
        .route("/api/jobs/:id/form", get(jobs::get_application_form))
        .route(
            "/api/jobs/:id/applications",
            post(applications::submit_application),
        )
        .route(
            "/api/jobs/:id/applications/check",
            get(applications::check_applied),
        )
        .route("/api/me/applications", get(applications::my_applications))
        .route_layer(from_fn_with_state(state.auth.clone(), require_user))
        .layer(from_fn_with_state(new_rps_state(app_rps), rps_middleware));

    let admin_api = Router::new()
        .route(
            "/api/admin/jobs",
            get(jobs::list_jobs).post(jobs::create_job),
        )
        .route(
            "/api/admin/jobs/:id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/api/admin/jobs/:id/form-config",
            put(jobs::replace_form_config),
        )
        .route(
            "/api/admin/applications",
            get(applications::list_applications),
        )
        .route(
            "/api/admin/applications/:id",
            get(applications::get_application),
        )
        .route(
            "/api/admin/applications/:id/status",
            post(applications::update_application_status),
        )
        .route(
            "/api/admin/dashboard/stats",
            get(applications::dashboard_stats),
        )
        .route_layer(from_fn_with_state(state.auth.clone(), require_admin))
        .layer(from_fn_with_state(new_rps_state(app_rps), rps_middleware));

    public_api
        .merge(applicant_api)
        .merge(admin_api)
        .with_state(state)
}
