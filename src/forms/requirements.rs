use std::collections::BTreeMap;

use crate::forms::catalog::{find_field, FieldType};
use crate::models::form_config::{FieldConfigEntry, FieldRequirement};
use crate::models::job::JobType;

/// Promotes an optional image-capture field to mandatory when the job type
/// demands a photo. Mandatory and hidden levels pass through untouched.
pub fn apply_capture_override(
    base: FieldRequirement,
    field_type: FieldType,
    job_type: Option<JobType>,
) -> FieldRequirement {
    let forced = field_type == FieldType::ImageCapture
        && job_type.map(|t| t.capture_mandatory()).unwrap_or(false);
    if forced && base == FieldRequirement::Optional {
        FieldRequirement::Mandatory
    } else {
        base
    }
}

/// Answers visibility and requirement questions for one job's configuration.
///
/// Fields without a configuration row are neither visible nor required.
#[derive(Debug, Clone, Default)]
pub struct RequirementResolver {
    levels: BTreeMap<String, FieldRequirement>,
    job_type: Option<JobType>,
}

impl RequirementResolver {
    pub fn new<C: FieldConfigEntry>(configs: &[C]) -> Self {
        let mut levels = BTreeMap::new();
        for config in configs {
            levels
                .entry(config.field_name().to_string())
                .and_modify(|level: &mut FieldRequirement| {
                    *level = (*level).max(config.requirement())
                })
                .or_insert(config.requirement());
        }
        Self {
            levels,
            job_type: None,
        }
    }

    pub fn with_job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    /// Requirement as stored, before any override.
    pub fn base_requirement(&self, field_name: &str) -> Option<FieldRequirement> {
        self.levels.get(field_name).copied()
    }

    /// Stored requirement with the job-type override applied.
    pub fn requirement(&self, field_name: &str) -> Option<FieldRequirement> {
        let base = self.base_requirement(field_name)?;
        Some(match find_field(field_name) {
            Some(def) => apply_capture_override(base, def.field_type, self.job_type),
            None => base,
        })
    }

    pub fn is_visible(&self, field_name: &str) -> bool {
        matches!(
            self.base_requirement(field_name),
            Some(level) if level != FieldRequirement::Hidden
        )
    }

    pub fn is_required(&self, field_name: &str) -> bool {
        self.requirement(field_name) == Some(FieldRequirement::Mandatory)
    }

    /// Configured names paired with their effective requirement, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, FieldRequirement)> + '_ {
        self.levels.keys().filter_map(move |name| {
            self.requirement(name)
                .map(|level| (name.as_str(), level))
        })
    }
}
