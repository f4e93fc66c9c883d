use std::sync::Arc;
use uuid::Uuid;

use crate::database::repository::{ApplicationRepository, JobRepository};
use crate::dto::application_dto::{ApplicationListQuery, SubmitApplicationPayload};
use crate::dto::{paginate, total_pages};
use crate::error::{Error, Result};
use crate::forms::schema::{normalize_email, ApplicationSchema};
use crate::models::application::{
    Application, ApplicationFilter, ApplicationStatus, NewApplication, StatusCount,
};
use crate::models::job::JobCounts;
use crate::utils::time::now;
use crate::utils::token::generate_reference_id;

const REFERENCE_PREFIX: &str = "APP";

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
}

pub struct ApplicationList {
    pub items: Vec<Application>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

pub struct DashboardStats {
    pub jobs: JobCounts,
    pub by_status: Vec<StatusCount>,
}

impl ApplicationService {
    pub fn new(applications: Arc<dyn ApplicationRepository>, jobs: Arc<dyn JobRepository>) -> Self {
        Self { applications, jobs }
    }

    /// Validates a submission against the job's generated schema and stores it.
    ///
    /// The duplicate lookup here only short-circuits the common case; the
    /// repository's (job, email) constraint decides when two submissions race.
    pub async fn submit(&self, job_id: Uuid, submission: SubmitApplicationPayload) -> Result<Application> {
        let job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        if !job.is_active {
            return Err(Error::BadRequest(
                "This job is no longer accepting applications".to_string(),
            ));
        }

        let schema = ApplicationSchema::for_job(&job);
        let validated = schema.validate(&submission).map_err(|errors| {
            tracing::info!(job_id = %job_id, invalid = errors.len(), "application rejected by form schema");
            Error::FormValidation(errors)
        })?;

        if self
            .applications
            .find_by_job_and_email(job_id, &validated.email)
            .await?
            .is_some()
        {
            tracing::info!(job_id = %job_id, "duplicate application refused before insert");
            return Err(Error::AlreadyApplied);
        }

        let new_application = NewApplication {
            job_id,
            reference: generate_reference_id(REFERENCE_PREFIX, now()),
            photo_url: validated.captured_image().map(str::to_string),
            applicant_name: validated.applicant_name,
            email: validated.email,
            form_data: validated.form_data,
        };

        match self.applications.create(new_application).await {
            Ok(application) => {
                tracing::info!(
                    job_id = %job_id,
                    application_id = %application.id,
                    reference = %application.reference,
                    "application submitted"
                );
                Ok(application)
            }
            Err(Error::AlreadyApplied) => {
                tracing::info!(job_id = %job_id, "duplicate application refused by store");
                Err(Error::AlreadyApplied)
            }
            Err(err) => Err(err),
        }
    }

    /// Advisory check used while the applicant is still typing.
    pub async fn has_applied(&self, job_id: Uuid, email: &str) -> Result<bool> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Ok(false);
        }
        Ok(self
            .applications
            .find_by_job_and_email(job_id, &email)
            .await?
            .is_some())
    }

    pub async fn get(&self, id: Uuid) -> Result<Application> {
        self.applications
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    pub async fn list(&self, query: ApplicationListQuery) -> Result<ApplicationList> {
        let (page, per_page, offset) = paginate(query.page, query.per_page);
        let filter = ApplicationFilter {
            job_id: query.job_id,
            status: query.status,
            email: None,
            search: query.search.filter(|s| !s.trim().is_empty()),
            sort: query.sort.unwrap_or_default(),
            direction: query.direction.unwrap_or_default(),
            limit: per_page,
            offset,
        };
        let result = self.applications.list(&filter).await?;

        Ok(ApplicationList {
            items: result.items,
            total: result.total,
            page,
            per_page,
            total_pages: total_pages(result.total, per_page),
        })
    }

    /// Everything one applicant has submitted, newest first.
    pub async fn list_for_email(&self, email: &str) -> Result<Vec<Application>> {
        let filter = ApplicationFilter {
            email: Some(normalize_email(email)),
            limit: 100,
            ..ApplicationFilter::default()
        };
        Ok(self.applications.list(&filter).await?.items)
    }

    /// Any status may follow any other.
    pub async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        let application = self
            .applications
            .update_status(id, status)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        tracing::info!(application_id = %id, status = status.as_str(), "application status changed");
        Ok(application)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        Ok(DashboardStats {
            jobs: self.jobs.counts().await?,
            by_status: self.applications.status_counts().await?,
        })
    }
}
