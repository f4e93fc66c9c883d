use std::sync::Arc;
use uuid::Uuid;

use crate::database::repository::JobRepository;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::dto::{paginate, total_pages};
use crate::error::{Error, Result};
use crate::forms::catalog::find_field;
use crate::forms::schema::ApplicationSchema;
use crate::models::form_config::{FormFieldConfig, JobFormConfig};
use crate::models::job::{Job, JobCounts, JobFilter};
use crate::utils::validation::ensure_unique_field_names;

#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

fn check_form_configs(configs: &[FormFieldConfig]) -> Result<()> {
    ensure_unique_field_names(configs)?;
    for config in configs.iter().filter(|c| find_field(&c.field_name).is_none()) {
        // Stored as-is; the schema generator skips names it does not know.
        tracing::warn!(field = %config.field_name, "form config references unknown field");
    }
    Ok(())
}

impl JobService {
    pub fn new(jobs: Arc<dyn JobRepository>) -> Self {
        Self { jobs }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        check_form_configs(&payload.form_configs)?;
        let (job, configs) = payload.into_parts();
        let job = self.jobs.create(job, configs).await?;
        tracing::info!(job_id = %job.id, title = %job.title, fields = job.form_configs.len(), "job created");
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let job = self
            .jobs
            .update(id, payload.into())
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        tracing::info!(job_id = %job.id, is_active = job.is_active, "job updated");
        Ok(job)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.jobs.delete(id).await? {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        tracing::info!(job_id = %id, "job deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        self.jobs
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    /// Jobs applicants may see; inactive ones look missing.
    pub async fn get_active(&self, id: Uuid) -> Result<Job> {
        let job = self.get_by_id(id).await?;
        if !job.is_active {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        Ok(job)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let (page, per_page, offset) = paginate(query.page, query.per_page);
        let filter = JobFilter {
            is_active: query.is_active,
            department: query.department.filter(|d| !d.trim().is_empty()),
            job_type: query.job_type,
            search: query.search.filter(|s| !s.trim().is_empty()),
            limit: per_page,
            offset,
        };
        let result = self.jobs.list(&filter).await?;

        Ok(JobList {
            items: result.items,
            total: result.total,
            page,
            per_page,
            total_pages: total_pages(result.total, per_page),
        })
    }

    pub async fn list_active(&self, query: JobListQuery) -> Result<JobList> {
        self.list(JobListQuery {
            is_active: Some(true),
            ..query
        })
        .await
    }

    /// Replaces the job's whole configuration set.
    pub async fn replace_form_config(
        &self,
        id: Uuid,
        configs: Vec<FormFieldConfig>,
    ) -> Result<Vec<JobFormConfig>> {
        check_form_configs(&configs)?;
        let stored = self.jobs.replace_form_configs(id, configs).await?;
        tracing::info!(job_id = %id, fields = stored.len(), "form config replaced");
        Ok(stored)
    }

    /// Schema for an active job's application form.
    pub async fn application_schema(&self, id: Uuid) -> Result<(Job, ApplicationSchema)> {
        let job = self.get_active(id).await?;
        let schema = ApplicationSchema::for_job(&job);
        Ok((job, schema))
    }

    pub async fn counts(&self) -> Result<JobCounts> {
        self.jobs.counts().await
    }
}
