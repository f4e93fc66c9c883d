//! Validation schema for one job's application form.
//!
//! The schema always carries the applicant name and email, plus one rule per
//! configured, catalogued, non-hidden field. Rules are keyed by field name in a
//! sorted map so that the same configuration always yields the same schema no
//! matter how the rows were ordered.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidateEmail;

use crate::forms::catalog::{find_field, FieldType, AVAILABLE_FORM_FIELDS};
use crate::forms::requirements::RequirementResolver;
use crate::models::form_config::{FieldConfigEntry, FieldRequirement};
use crate::models::job::Job;

pub const APPLICANT_NAME: &str = "applicant_name";
pub const EMAIL: &str = "email";

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const PHONE_MIN_CHARS: usize = 8;
pub const PHONE_MAX_CHARS: usize = 20;
pub const LONG_TEXT_MIN_CHARS: usize = 10;
pub const NUMBER_MIN: f64 = 0.0;
pub const NUMBER_MAX: f64 = 50.0;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const NAME_TOO_LONG: &str = "Name is too long";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PHONE_TOO_SHORT: &str = "Phone number must be at least 8 digits";
pub const PHONE_TOO_LONG: &str = "Phone number is too long";
pub const PHONE_INVALID: &str = "Please enter a valid phone number";
pub const URL_INVALID: &str = "Please enter a valid URL";
pub const NUMBER_INVALID: &str = "Please enter a valid number";
pub const NUMBER_NEGATIVE: &str = "Must be a positive number";
pub const NUMBER_TOO_HIGH: &str = "Value seems too high";
pub const DATE_REQUIRED: &str = "Please select a date";
pub const OPTION_REQUIRED: &str = "Please select an option";
pub const LONG_TEXT_TOO_SHORT: &str = "Please provide more detail (at least 10 characters)";
pub const PHOTO_REQUIRED: &str = "Photo is required";
pub const FIELD_REQUIRED: &str = "This field is required";
pub const INVALID_VALUE: &str = "Invalid value";

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[\d\s-]+$").expect("phone pattern compiles"));

/// Per-field messages for a rejected submission, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldRule {
    /// Checks one raw value. `Ok(None)` means an accepted empty optional value.
    pub fn check(&self, raw: Option<&JsonValue>) -> Result<Option<JsonValue>, &'static str> {
        let text = as_text(raw)?;
        let text = text.trim();

        match self.field_type {
            FieldType::Phone => {
                if text.is_empty() && !self.required {
                    return Ok(None);
                }
                let len = text.chars().count();
                if len < PHONE_MIN_CHARS {
                    Err(PHONE_TOO_SHORT)
                } else if len > PHONE_MAX_CHARS {
                    Err(PHONE_TOO_LONG)
                } else if !PHONE_PATTERN.is_match(text) {
                    Err(PHONE_INVALID)
                } else {
                    Ok(Some(JsonValue::String(text.to_string())))
                }
            }
            FieldType::Url => {
                if text.is_empty() && !self.required {
                    return Ok(None);
                }
                // Stored links are rendered to recruiters; only web schemes are kept.
                match url::Url::parse(text) {
                    Ok(link) if matches!(link.scheme(), "http" | "https") && link.has_host() => {
                        Ok(Some(JsonValue::String(text.to_string())))
                    }
                    _ => Err(URL_INVALID),
                }
            }
            FieldType::Number => {
                if text.is_empty() && !self.required {
                    return Ok(None);
                }
                let value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or(NUMBER_INVALID)?;
                if value < NUMBER_MIN {
                    Err(NUMBER_NEGATIVE)
                } else if value > NUMBER_MAX {
                    Err(NUMBER_TOO_HIGH)
                } else {
                    Ok(Some(number_value(value)))
                }
            }
            FieldType::LongText => {
                if self.required && text.chars().count() < LONG_TEXT_MIN_CHARS {
                    Err(LONG_TEXT_TOO_SHORT)
                } else {
                    Ok(non_empty(text))
                }
            }
            FieldType::Date => self.presence(text, DATE_REQUIRED),
            FieldType::Select => self.presence(text, OPTION_REQUIRED),
            FieldType::ImageCapture => self.presence(text, PHOTO_REQUIRED),
            FieldType::ShortText => self.presence(text, FIELD_REQUIRED),
        }
    }

    fn presence(&self, text: &str, message: &'static str) -> Result<Option<JsonValue>, &'static str> {
        if self.required && text.is_empty() {
            Err(message)
        } else {
            Ok(non_empty(text))
        }
    }
}

fn as_text(raw: Option<&JsonValue>) -> Result<Cow<'_, str>, &'static str> {
    match raw {
        None | Some(JsonValue::Null) => Ok(Cow::Borrowed("")),
        Some(JsonValue::String(s)) => Ok(Cow::Borrowed(s.as_str())),
        Some(JsonValue::Number(n)) => Ok(Cow::Owned(n.to_string())),
        Some(JsonValue::Bool(b)) => Ok(Cow::Owned(b.to_string())),
        Some(_) => Err(INVALID_VALUE),
    }
}

fn non_empty(text: &str) -> Option<JsonValue> {
    (!text.is_empty()).then(|| JsonValue::String(text.to_string()))
}

fn number_value(value: f64) -> JsonValue {
    if value.fract() == 0.0 {
        JsonValue::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

/// A submission that passed its schema. `form_data` only holds schema fields
/// with a non-empty value; the email is trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub applicant_name: String,
    pub email: String,
    pub form_data: Map<String, JsonValue>,
}

impl ValidatedSubmission {
    /// Reference of the captured image, when the form had one.
    pub fn captured_image(&self) -> Option<&str> {
        AVAILABLE_FORM_FIELDS
            .iter()
            .filter(|field| field.field_type == FieldType::ImageCapture)
            .find_map(|field| self.form_data.get(field.name).and_then(JsonValue::as_str))
    }
}

/// A field the applicant should be shown, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [&'static str],
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationSchema {
    rules: BTreeMap<&'static str, FieldRule>,
}

impl ApplicationSchema {
    /// Builds the schema from configuration rows alone.
    pub fn generate<C: FieldConfigEntry>(configs: &[C]) -> Self {
        Self::from_resolver(&RequirementResolver::new(configs))
    }

    /// Builds the schema for a stored job, including its job-type override.
    pub fn for_job(job: &Job) -> Self {
        Self::from_resolver(&RequirementResolver::new(&job.form_configs).with_job_type(job.job_type))
    }

    pub fn from_resolver(resolver: &RequirementResolver) -> Self {
        let rules = resolver
            .entries()
            .filter(|(_, level)| *level != FieldRequirement::Hidden)
            .filter_map(|(name, level)| {
                let def = find_field(name)?;
                Some((
                    def.name,
                    FieldRule {
                        field_type: def.field_type,
                        required: level == FieldRequirement::Mandatory,
                    },
                ))
            })
            .collect();
        Self { rules }
    }

    pub fn rule(&self, field_name: &str) -> Option<&FieldRule> {
        self.rules.get(field_name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn visible_fields(&self) -> Vec<VisibleField> {
        AVAILABLE_FORM_FIELDS
            .iter()
            .filter_map(|def| {
                self.rules.get(def.name).map(|rule| VisibleField {
                    name: def.name,
                    label: def.label,
                    field_type: def.field_type,
                    options: def.options,
                    required: rule.required,
                })
            })
            .collect()
    }

    /// Validates a flat key-value submission. Keys outside the schema are dropped.
    pub fn validate(&self, submission: &Map<String, JsonValue>) -> Result<ValidatedSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();

        let applicant_name = match as_text(submission.get(APPLICANT_NAME)) {
            Ok(text) => {
                let name = text.trim().to_string();
                let len = name.chars().count();
                if len < NAME_MIN_CHARS {
                    errors.insert(APPLICANT_NAME, NAME_TOO_SHORT);
                } else if len > NAME_MAX_CHARS {
                    errors.insert(APPLICANT_NAME, NAME_TOO_LONG);
                }
                name
            }
            Err(message) => {
                errors.insert(APPLICANT_NAME, message);
                String::new()
            }
        };

        let email = match as_text(submission.get(EMAIL)) {
            Ok(text) => {
                let email = normalize_email(&text);
                if !email.validate_email() {
                    errors.insert(EMAIL, EMAIL_INVALID);
                }
                email
            }
            Err(_) => {
                errors.insert(EMAIL, EMAIL_INVALID);
                String::new()
            }
        };

        let mut form_data = Map::new();
        for (name, rule) in &self.rules {
            match rule.check(submission.get(*name)) {
                Ok(Some(value)) => {
                    form_data.insert((*name).to_string(), value);
                }
                Ok(None) => {}
                Err(message) => errors.insert(*name, message),
            }
        }

        if errors.is_empty() {
            Ok(ValidatedSubmission {
                applicant_name,
                email,
                form_data,
            })
        } else {
            Err(errors)
        }
    }
}

/// Canonical form used for duplicate detection and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
