use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
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

/// Name of the unique constraint on `applications (job_id, email)`.
pub const APPLICATION_JOB_EMAIL_KEY: &str = "applications_job_id_email_key";

const JOB_COLUMNS: &str =
    "id, title, description, department, salary_range, job_type, is_active, created_at, updated_at";
const CONFIG_COLUMNS: &str = "id, job_id, field_name, requirement, created_at";
const APPLICATION_COLUMNS: &str = "id, job_id, reference, applicant_name, email, form_data, photo_url, status, created_at, updated_at";

#[derive(Debug, FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    department: Option<String>,
    salary_range: Option<String>,
    job_type: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRow {
    fn into_job(self, form_configs: Vec<JobFormConfig>) -> Result<Job> {
        Ok(Job {
            id: self.id,
            title: self.title,
            description: self.description,
            department: self.department,
            salary_range: self.salary_range,
            job_type: self.job_type.parse().map_err(Error::Internal)?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            form_configs,
        })
    }
}

#[derive(Debug, FromRow)]
struct ConfigRow {
    id: Uuid,
    job_id: Uuid,
    field_name: String,
    requirement: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ConfigRow> for JobFormConfig {
    type Error = Error;

    fn try_from(row: ConfigRow) -> Result<Self> {
        Ok(JobFormConfig {
            id: row.id,
            job_id: row.job_id,
            field_name: row.field_name,
            requirement: row.requirement.parse().map_err(Error::Internal)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    reference: String,
    applicant_name: String,
    email: String,
    form_data: JsonValue,
    photo_url: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        let form_data = match row.form_data {
            JsonValue::Object(map) => map,
            JsonValue::Null => Map::new(),
            other => {
                return Err(Error::Internal(format!(
                    "application {} has non-object form_data: {}",
                    row.id, other
                )))
            }
        };
        Ok(Application {
            id: row.id,
            job_id: row.job_id,
            reference: row.reference,
            applicant_name: row.applicant_name,
            email: row.email,
            form_data,
            photo_url: row.photo_url,
            status: row.status.parse().map_err(Error::Internal)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn configs_for(&self, job_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<JobFormConfig>>> {
        let rows = sqlx::query_as::<_, ConfigRow>(&format!(
            "SELECT {} FROM job_form_configs WHERE job_id = ANY($1) ORDER BY created_at, field_name",
            CONFIG_COLUMNS
        ))
        .bind(job_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<JobFormConfig>> = HashMap::new();
        for row in rows {
            let config = JobFormConfig::try_from(row)?;
            grouped.entry(config.job_id).or_default().push(config);
        }
        Ok(grouped)
    }

    async fn attach_configs(&self, rows: Vec<JobRow>) -> Result<Vec<Job>> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut configs = self.configs_for(&ids).await?;
        rows.into_iter()
            .map(|row| {
                let job_configs = configs.remove(&row.id).unwrap_or_default();
                row.into_job(job_configs)
            })
            .collect()
    }
}

async fn insert_configs(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    job_id: Uuid,
    configs: &[FormFieldConfig],
) -> Result<Vec<JobFormConfig>> {
    let mut stored = Vec::with_capacity(configs.len());
    for config in configs {
        let row = sqlx::query_as::<_, ConfigRow>(&format!(
            "INSERT INTO job_form_configs (job_id, field_name, requirement) VALUES ($1, $2, $3) RETURNING {}",
            CONFIG_COLUMNS
        ))
        .bind(job_id)
        .bind(&config.field_name)
        .bind(config.requirement.as_str())
        .fetch_one(&mut **tx)
        .await?;
        stored.push(JobFormConfig::try_from(row)?);
    }
    Ok(stored)
}

/// Escapes LIKE wildcards so user text matches literally under `ESCAPE '\'`.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(search: &str) -> String {
    format!("%{}%", escape_like(search))
}

fn push_job_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    builder.push(" WHERE TRUE");
    if let Some(active) = filter.is_active {
        builder.push(" AND is_active = ").push_bind(active);
    }
    if let Some(department) = &filter.department {
        builder
            .push(" AND department ILIKE ")
            .push_bind(escape_like(department))
            .push(r" ESCAPE '\'");
    }
    if let Some(job_type) = filter.job_type {
        builder.push(" AND job_type = ").push_bind(job_type.as_str());
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR department ILIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\')");
    }
}

fn push_application_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ApplicationFilter) {
    builder.push(" WHERE TRUE");
    if let Some(job_id) = filter.job_id {
        builder.push(" AND job_id = ").push_bind(job_id);
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(email) = &filter.email {
        builder.push(" AND email = ").push_bind(normalize_email(email));
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        builder
            .push(" AND (applicant_name ILIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR email ILIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\')");
    }
}

fn map_insert_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() && db.constraint() == Some(APPLICATION_JOB_EMAIL_KEY) {
            return Error::AlreadyApplied;
        }
        if db.is_foreign_key_violation() {
            return Error::NotFound("Job not found".to_string());
        }
    }
    Error::from(err)
}

#[async_trait]
impl JobRepository for PgStore {
    async fn create(&self, job: NewJob, configs: Vec<FormFieldConfig>) -> Result<Job> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (title, description, department, salary_range, job_type, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.department)
        .bind(&job.salary_range)
        .bind(job.job_type.as_str())
        .bind(job.is_active)
        .fetch_one(&mut *tx)
        .await?;

        let form_configs = insert_configs(&mut tx, row.id, &configs).await?;
        tx.commit().await?;
        row.into_job(form_configs)
    }

    async fn update(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                department = COALESCE($4, department),
                salary_range = COALESCE($5, salary_range),
                job_type = COALESCE($6, job_type),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.department)
        .bind(changes.salary_range)
        .bind(changes.job_type.map(|t| t.as_str()))
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_configs(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_configs(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &JobFilter) -> Result<Page<Job>> {
        let mut items_query = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
        push_job_filters(&mut items_query, filter);
        items_query
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);
        let rows = items_query
            .build_query_as::<JobRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut total_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        push_job_filters(&mut total_query, filter);
        let total = total_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            items: self.attach_configs(rows).await?,
            total,
        })
    }

    async fn replace_form_configs(
        &self,
        job_id: Uuid,
        configs: Vec<FormFieldConfig>,
    ) -> Result<Vec<JobFormConfig>> {
        let mut tx = self.pool.begin().await?;
        let touched = sqlx::query("UPDATE jobs SET updated_at = NOW() WHERE id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            return Err(Error::NotFound("Job not found".to_string()));
        }

        sqlx::query("DELETE FROM job_form_configs WHERE job_id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;
        let stored = insert_configs(&mut tx, job_id, &configs).await?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn counts(&self) -> Result<JobCounts> {
        let (total, active): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM jobs",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(JobCounts { total, active })
    }
}

#[async_trait]
impl ApplicationRepository for PgStore {
    async fn create(&self, application: NewApplication) -> Result<Application> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            INSERT INTO applications (job_id, reference, applicant_name, email, form_data, photo_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(application.job_id)
        .bind(&application.reference)
        .bind(&application.applicant_name)
        .bind(normalize_email(&application.email))
        .bind(JsonValue::Object(application.form_data))
        .bind(&application.photo_url)
        .bind(ApplicationStatus::Applied.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Application::try_from(row)
    }

    async fn find_by_job_and_email(&self, job_id: Uuid, email: &str) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM applications WHERE job_id = $1 AND email = $2",
            APPLICATION_COLUMNS
        ))
        .bind(job_id)
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn list(&self, filter: &ApplicationFilter) -> Result<Page<Application>> {
        let sort_column = match filter.sort {
            ApplicationSortField::CreatedAt => "created_at",
            ApplicationSortField::ApplicantName => "LOWER(applicant_name)",
            ApplicationSortField::Email => "email",
            ApplicationSortField::Status => "status",
        };
        let direction = match filter.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };

        let mut items_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM applications", APPLICATION_COLUMNS));
        push_application_filters(&mut items_query, filter);
        items_query
            .push(format!(
                " ORDER BY {sort_column} {direction}, created_at {direction}, id {direction} LIMIT "
            ))
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);
        let rows = items_query
            .build_query_as::<ApplicationRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut total_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM applications");
        push_application_filters(&mut total_query, filter);
        let total = total_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(Application::try_from)
                .collect::<Result<Vec<_>>>()?,
            total,
        })
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn status_counts(&self) -> Result<Vec<StatusCount>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM applications GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        let mut counts: HashMap<String, i64> = rows.into_iter().collect();
        Ok(ApplicationStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: counts.remove(status.as_str()).unwrap_or(0),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_in_search_text_are_literal() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like(r"C:\temp"), r"C:\\temp");
        assert_eq!(contains_pattern("jane"), "%jane%");
    }

    #[test]
    fn search_filters_declare_the_escape_character() {
        let mut jobs = QueryBuilder::<Postgres>::new("SELECT id FROM jobs");
        push_job_filters(
            &mut jobs,
            &JobFilter {
                department: Some("R_D".to_string()),
                search: Some("100%".to_string()),
                ..JobFilter::default()
            },
        );
        assert_eq!(jobs.sql().matches(r"ESCAPE '\'").count(), 3);

        let mut applications = QueryBuilder::<Postgres>::new("SELECT id FROM applications");
        push_application_filters(
            &mut applications,
            &ApplicationFilter {
                search: Some("a_b".to_string()),
                ..ApplicationFilter::default()
            },
        );
        assert_eq!(applications.sql().matches(r"ESCAPE '\'").count(), 2);
    }
}
