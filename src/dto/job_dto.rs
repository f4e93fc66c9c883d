use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::forms::catalog::FieldDefinition;
use crate::forms::schema::VisibleField;
use crate::models::form_config::{FormFieldConfig, JobFormConfig};
use crate::models::job::{Job, JobChanges, JobType, NewJob};
use crate::services::job_service::JobList;
use crate::utils::validation::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    #[validate(length(max = 100))]
    pub salary_range: Option<String>,
    pub job_type: Option<JobType>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub form_configs: Vec<FormFieldConfig>,
}

fn default_active() -> bool {
    true
}

impl CreateJobPayload {
    pub fn into_parts(self) -> (NewJob, Vec<FormFieldConfig>) {
        let job = NewJob {
            title: self.title.trim().to_string(),
            description: self.description,
            department: self.department,
            salary_range: self.salary_range,
            job_type: self.job_type.unwrap_or_default(),
            is_active: self.is_active,
        };
        (job, self.form_configs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    #[validate(length(max = 100))]
    pub salary_range: Option<String>,
    pub job_type: Option<JobType>,
    pub is_active: Option<bool>,
}

impl From<UpdateJobPayload> for JobChanges {
    fn from(value: UpdateJobPayload) -> Self {
        Self {
            title: value.title.map(|t| t.trim().to_string()),
            description: value.description,
            department: value.department,
            salary_range: value.salary_range,
            job_type: value.job_type,
            is_active: value.is_active,
        }
    }
}

/// Full replacement of a job's form configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceFormConfigPayload {
    pub form_configs: Vec<FormFieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfigResponse {
    pub job_id: Uuid,
    pub form_configs: Vec<JobFormConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: JobType,
    pub is_active: bool,
    pub form_configs: Vec<JobFormConfig>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job card shown to applicants; configuration rows stay internal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPublicSummary {
    pub id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: JobType,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPublicListResponse {
    pub items: Vec<JobPublicSummary>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub is_active: Option<bool>,
    pub department: Option<String>,
    pub job_type: Option<JobType>,
    pub search: Option<String>,
}

/// What the apply page needs to render a job's form.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationFormResponse {
    pub job_id: Uuid,
    pub title: String,
    pub job_type: JobType,
    pub fields: Vec<VisibleField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTypeResponse {
    pub name: &'static str,
    pub label: &'static str,
    pub capture_mandatory: bool,
}

impl From<JobType> for JobTypeResponse {
    fn from(value: JobType) -> Self {
        Self {
            name: value.as_str(),
            label: value.label(),
            capture_mandatory: value.capture_mandatory(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormFieldCatalogResponse {
    pub items: &'static [FieldDefinition],
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentsResponse {
    pub items: &'static [&'static str],
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            department: value.department,
            salary_range: value.salary_range,
            job_type: value.job_type,
            is_active: value.is_active,
            form_configs: value.form_configs,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Job> for JobPublicSummary {
    fn from(value: Job) -> Self {
        let summary = value.description.as_ref().map(|text| {
            let trimmed = text.trim();
            if trimmed.chars().count() > 320 {
                format!("{}…", trimmed.chars().take(320).collect::<String>())
            } else {
                trimmed.to_string()
            }
        });

        Self {
            id: value.id,
            title: value.title,
            department: value.department,
            salary_range: value.salary_range,
            job_type: value.job_type,
            summary,
            created_at: value.created_at,
        }
    }
}

impl From<JobList> for JobListResponse {
    fn from(value: JobList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}

impl From<JobList> for JobPublicListResponse {
    fn from(value: JobList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
