use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::form_config::JobFormConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: JobType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub form_configs: Vec<JobFormConfig>,
}

/// Fields a recruiter sets on a new job.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: JobType,
    pub is_active: bool,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<JobType>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    #[default]
    FullTime,
    Intern,
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::FullTime, JobType::Intern, JobType::Contract];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "fulltime",
            JobType::Intern => "intern",
            JobType::Contract => "contract",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::Intern => "Intern",
            JobType::Contract => "Contract",
        }
    }

    /// Full-time hires must send a captured photo with every application.
    pub fn capture_mandatory(&self) -> bool {
        matches!(self, JobType::FullTime)
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str() == s)
            .ok_or_else(|| format!("unknown job type: {}", s))
    }
}

pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Design",
    "Product",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Operations",
    "Customer Support",
];

#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub is_active: Option<bool>,
    pub department: Option<String>,
    pub job_type: Option<JobType>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounts {
    pub total: i64,
    pub active: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_full_time_forces_capture() {
        assert_eq!(JobType::default(), JobType::FullTime);
        assert!(JobType::FullTime.capture_mandatory());
        assert!(!JobType::Intern.capture_mandatory());
        assert!(!JobType::Contract.capture_mandatory());
    }

    #[test]
    fn wire_names_round_trip() {
        for job_type in JobType::ALL {
            assert_eq!(job_type.as_str().parse::<JobType>(), Ok(job_type));
            assert_eq!(
                serde_json::to_value(job_type).unwrap(),
                serde_json::json!(job_type.as_str())
            );
        }
        assert!("full_time".parse::<JobType>().is_err());
    }
}
