use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::repository::{ApplicationRepository, JobRepository, Page};
use crate::error::{Error, Result};
use crate::forms::schema::normalize_email;
use crate::models::application::{
    Application, ApplicationFilter, ApplicationSortField, ApplicationStatus, NewApplication,
    SortDirection, StatusCount,
};
use crate::models::form_config::{FormFieldConfig, JobFormConfig};
use crate::models::job::{Job, JobChanges, JobCounts, JobFilter, NewJob};
use crate::utils::time::now;

#[derive(Debug, Default)]
struct State {
    jobs: HashMap<Uuid, Job>,
    applications: Vec<Application>,
}

/// Process-local store for tests and offline mode. Cloning shares the data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn config_rows(job_id: Uuid, configs: Vec<FormFieldConfig>) -> Vec<JobFormConfig> {
    let created_at = now();
    configs
        .into_iter()
        .map(|config| JobFormConfig {
            id: Uuid::new_v4(),
            job_id,
            field_name: config.field_name,
            requirement: config.requirement,
            created_at,
        })
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T: Clone>(items: Vec<T>, limit: i64, offset: i64) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(if limit > 0 { limit as usize } else { usize::MAX })
        .collect();
    Page { items, total }
}

fn compare_applications(a: &Application, b: &Application, sort: ApplicationSortField) -> Ordering {
    let primary = match sort {
        ApplicationSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ApplicationSortField::ApplicantName => a
            .applicant_name
            .to_lowercase()
            .cmp(&b.applicant_name.to_lowercase()),
        ApplicationSortField::Email => a.email.cmp(&b.email),
        ApplicationSortField::Status => a.status.as_str().cmp(b.status.as_str()),
    };
    primary
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn create(&self, job: NewJob, configs: Vec<FormFieldConfig>) -> Result<Job> {
        let id = Uuid::new_v4();
        let timestamp = now();
        let job = Job {
            id,
            title: job.title,
            description: job.description,
            department: job.department,
            salary_range: job.salary_range,
            job_type: job.job_type,
            is_active: job.is_active,
            created_at: timestamp,
            updated_at: timestamp,
            form_configs: config_rows(id, configs),
        };
        self.state.write().await.jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn update(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>> {
        let mut state = self.state.write().await;
        let Some(job) = state.jobs.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            job.title = title;
        }
        if let Some(description) = changes.description {
            job.description = Some(description);
        }
        if let Some(department) = changes.department {
            job.department = Some(department);
        }
        if let Some(salary_range) = changes.salary_range {
            job.salary_range = Some(salary_range);
        }
        if let Some(job_type) = changes.job_type {
            job.job_type = job_type;
        }
        if let Some(is_active) = changes.is_active {
            job.is_active = is_active;
        }
        job.updated_at = now();
        Ok(Some(job.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        let removed = state.jobs.remove(&id).is_some();
        if removed {
            state.applications.retain(|app| app.job_id != id);
        }
        Ok(removed)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        Ok(self.state.read().await.jobs.get(&id).cloned())
    }

    async fn list(&self, filter: &JobFilter) -> Result<Page<Job>> {
        let state = self.state.read().await;
        let mut items: Vec<Job> = state
            .jobs
            .values()
            .filter(|job| filter.is_active.map_or(true, |active| job.is_active == active))
            .filter(|job| filter.job_type.map_or(true, |t| job.job_type == t))
            .filter(|job| {
                filter.department.as_deref().map_or(true, |dept| {
                    job.department
                        .as_deref()
                        .map_or(false, |d| d.eq_ignore_ascii_case(dept))
                })
            })
            .filter(|job| {
                filter.search.as_deref().map_or(true, |q| {
                    contains_ci(&job.title, q)
                        || job.department.as_deref().map_or(false, |d| contains_ci(d, q))
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(paginate(items, filter.limit, filter.offset))
    }

    async fn replace_form_configs(
        &self,
        job_id: Uuid,
        configs: Vec<FormFieldConfig>,
    ) -> Result<Vec<JobFormConfig>> {
        let mut state = self.state.write().await;
        let job = state
            .jobs
            .get_mut(&job_id)
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        job.form_configs = config_rows(job_id, configs);
        job.updated_at = now();
        Ok(job.form_configs.clone())
    }

    async fn counts(&self) -> Result<JobCounts> {
        let state = self.state.read().await;
        Ok(JobCounts {
            total: state.jobs.len() as i64,
            active: state.jobs.values().filter(|job| job.is_active).count() as i64,
        })
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn create(&self, application: NewApplication) -> Result<Application> {
        let mut state = self.state.write().await;
        if !state.jobs.contains_key(&application.job_id) {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        let email = normalize_email(&application.email);
        let duplicate = state
            .applications
            .iter()
            .any(|app| app.job_id == application.job_id && app.email == email);
        if duplicate {
            return Err(Error::AlreadyApplied);
        }

        let timestamp = now();
        let stored = Application {
            id: Uuid::new_v4(),
            job_id: application.job_id,
            reference: application.reference,
            applicant_name: application.applicant_name,
            email,
            form_data: application.form_data,
            photo_url: application.photo_url,
            status: ApplicationStatus::Applied,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.applications.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_job_and_email(&self, job_id: Uuid, email: &str) -> Result<Option<Application>> {
        let email = normalize_email(email);
        Ok(self
            .state
            .read()
            .await
            .applications
            .iter()
            .find(|app| app.job_id == job_id && app.email == email)
            .cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>> {
        Ok(self
            .state
            .read()
            .await
            .applications
            .iter()
            .find(|app| app.id == id)
            .cloned())
    }

    async fn list(&self, filter: &ApplicationFilter) -> Result<Page<Application>> {
        let state = self.state.read().await;
        let email = filter.email.as_deref().map(normalize_email);
        let mut items: Vec<Application> = state
            .applications
            .iter()
            .filter(|app| filter.job_id.map_or(true, |id| app.job_id == id))
            .filter(|app| filter.status.map_or(true, |s| app.status == s))
            .filter(|app| email.as_deref().map_or(true, |e| app.email == e))
            .filter(|app| {
                filter.search.as_deref().map_or(true, |q| {
                    contains_ci(&app.applicant_name, q) || contains_ci(&app.email, q)
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            let ordering = compare_applications(a, b, filter.sort);
            match filter.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        Ok(paginate(items, filter.limit, filter.offset))
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Option<Application>> {
        let mut state = self.state.write().await;
        Ok(state
            .applications
            .iter_mut()
            .find(|app| app.id == id)
            .map(|app| {
                app.status = status;
                app.updated_at = now();
                app.clone()
            }))
    }

    async fn status_counts(&self) -> Result<Vec<StatusCount>> {
        let state = self.state.read().await;
        Ok(ApplicationStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: state.applications.iter().filter(|app| app.status == status).count() as i64,
            })
            .collect())
    }
}
