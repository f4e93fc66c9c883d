use crate::database::repository::JobRepository;
use crate::error::Result;
use crate::models::form_config::{FieldRequirement, FormFieldConfig};
use crate::models::job::{JobType, NewJob};

/// Two demo jobs for offline runs, so the apply flow works without a database.
pub async fn seed_demo_jobs(jobs: &dyn JobRepository) -> Result<()> {
    use FieldRequirement::{Hidden, Mandatory, Optional};

    jobs.create(
        NewJob {
            title: "Senior Frontend Developer".to_string(),
            description: Some(
                "We are looking for an experienced frontend developer to join our team."
                    .to_string(),
            ),
            department: Some("Engineering".to_string()),
            salary_range: Some("$120,000 - $150,000".to_string()),
            job_type: JobType::FullTime,
            is_active: true,
        },
        vec![
            FormFieldConfig::new("phone", Mandatory),
            FormFieldConfig::new("linkedin", Optional),
            FormFieldConfig::new("resume_url", Mandatory),
            FormFieldConfig::new("photo", Optional),
        ],
    )
    .await?;

    jobs.create(
        NewJob {
            title: "Backend Engineer".to_string(),
            description: Some(
                "Join our backend team to build scalable APIs and services.".to_string(),
            ),
            department: Some("Engineering".to_string()),
            salary_range: Some("$100,000 - $130,000".to_string()),
            job_type: JobType::FullTime,
            is_active: true,
        },
        vec![
            FormFieldConfig::new("phone", Optional),
            FormFieldConfig::new("years_experience", Mandatory),
            FormFieldConfig::new("cover_letter", Hidden),
        ],
    )
    .await?;

    tracing::info!(jobs = 2, "seeded demo jobs");
    Ok(())
}
