use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::application::{
    Application, ApplicationFilter, ApplicationStatus, NewApplication, StatusCount,
};
use crate::models::form_config::{FormFieldConfig, JobFormConfig};
use crate::models::job::{Job, JobChanges, JobCounts, JobFilter, NewJob};

/// One page of results plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Inserts the job together with its initial configuration set.
    async fn create(&self, job: NewJob, configs: Vec<FormFieldConfig>) -> Result<Job>;

    async fn update(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>>;

    /// Removes the job, its configuration and its applications.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn get(&self, id: Uuid) -> Result<Option<Job>>;

    async fn list(&self, filter: &JobFilter) -> Result<Page<Job>>;

    /// Swaps the whole configuration set of a job in one step.
    async fn replace_form_configs(
        &self,
        job_id: Uuid,
        configs: Vec<FormFieldConfig>,
    ) -> Result<Vec<JobFormConfig>>;

    async fn counts(&self) -> Result<JobCounts>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Stores a new application with status `applied`.
    ///
    /// Must fail with `Error::AlreadyApplied` when an application for the same
    /// (job, email) pair exists, however the caller got here.
    async fn create(&self, application: NewApplication) -> Result<Application>;

    async fn find_by_job_and_email(&self, job_id: Uuid, email: &str) -> Result<Option<Application>>;

    async fn get(&self, id: Uuid) -> Result<Option<Application>>;

    async fn list(&self, filter: &ApplicationFilter) -> Result<Page<Application>>;

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Option<Application>>;

    async fn status_counts(&self) -> Result<Vec<StatusCount>>;
}
