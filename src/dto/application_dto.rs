use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::models::application::{
    Application, ApplicationSortField, ApplicationStatus, SortDirection, StatusCount,
};
use crate::services::application_service::{ApplicationList, DashboardStats};

/// Flat key-value submission: `applicant_name`, `email` and one key per form field.
pub type SubmitApplicationPayload = Map<String, JsonValue>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasAppliedQuery {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasAppliedResponse {
    pub applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub job_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
    pub sort: Option<ApplicationSortField>,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub reference: String,
    pub applicant_name: String,
    pub email: String,
    pub form_data: Map<String, JsonValue>,
    pub photo_url: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_applications: i64,
    pub by_status: Vec<StatusCount>,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            reference: value.reference,
            applicant_name: value.applicant_name,
            email: value.email,
            form_data: value.form_data,
            photo_url: value.photo_url,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ApplicationList> for ApplicationListResponse {
    fn from(value: ApplicationList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(value: DashboardStats) -> Self {
        Self {
            total_jobs: value.jobs.total,
            active_jobs: value.jobs.active,
            total_applications: value.by_status.iter().map(|s| s.count).sum(),
            by_status: value.by_status,
        }
    }
}
