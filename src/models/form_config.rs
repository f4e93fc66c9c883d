use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How a job treats one catalog field. Variant order is strictness, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRequirement {
    Hidden,
    Optional,
    Mandatory,
}

impl FieldRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRequirement::Hidden => "hidden",
            FieldRequirement::Optional => "optional",
            FieldRequirement::Mandatory => "mandatory",
        }
    }
}

impl fmt::Display for FieldRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hidden" => Ok(FieldRequirement::Hidden),
            "optional" => Ok(FieldRequirement::Optional),
            "mandatory" => Ok(FieldRequirement::Mandatory),
            other => Err(format!("unknown field requirement: {}", other)),
        }
    }
}

/// Requirement declaration as submitted by a recruiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldConfig {
    pub field_name: String,
    pub requirement: FieldRequirement,
}

impl FormFieldConfig {
    pub fn new(field_name: impl Into<String>, requirement: FieldRequirement) -> Self {
        Self {
            field_name: field_name.into(),
            requirement,
        }
    }
}

/// Stored requirement row, unique per (job_id, field_name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFormConfig {
    pub id: Uuid,
    pub job_id: Uuid,
    pub field_name: String,
    pub requirement: FieldRequirement,
    pub created_at: DateTime<Utc>,
}

/// Anything that names a field and its requirement level.
pub trait FieldConfigEntry {
    fn field_name(&self) -> &str;
    fn requirement(&self) -> FieldRequirement;
}

impl FieldConfigEntry for FormFieldConfig {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn requirement(&self) -> FieldRequirement {
        self.requirement
    }
}

impl FieldConfigEntry for JobFormConfig {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn requirement(&self) -> FieldRequirement {
        self.requirement
    }
}
