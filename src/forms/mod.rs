//! Configuration-driven application forms: the field catalog, requirement
//! resolution and the validation schema generated from a job's configuration.

pub mod catalog;
pub mod requirements;
pub mod schema;

pub use catalog::{find_field, FieldDefinition, FieldType, AVAILABLE_FORM_FIELDS};
pub use requirements::{apply_capture_override, RequirementResolver};
pub use schema::{ApplicationSchema, FieldErrors, FieldRule, ValidatedSubmission, VisibleField};
