use serde::{Deserialize, Serialize};

/// Primitive value type of an application-form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    ShortText,
    Phone,
    Url,
    Number,
    Date,
    Select,
    LongText,
    ImageCapture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [&'static str],
}

impl FieldDefinition {
    const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            options: &[],
        }
    }
}

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Other", "Prefer not to say"];

/// Every optional field a job can ask for. Applicant name and email are always
/// collected and are not part of the catalog.
pub const AVAILABLE_FORM_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new("phone", "Phone Number", FieldType::Phone),
    FieldDefinition {
        name: "gender",
        label: "Gender",
        field_type: FieldType::Select,
        options: GENDER_OPTIONS,
    },
    FieldDefinition::new("date_of_birth", "Date of Birth", FieldType::Date),
    FieldDefinition::new("domicile", "Domicile / City", FieldType::ShortText),
    FieldDefinition::new("linkedin", "LinkedIn URL", FieldType::Url),
    FieldDefinition::new("resume_url", "Resume Link", FieldType::Url),
    FieldDefinition::new("portfolio", "Portfolio URL", FieldType::Url),
    FieldDefinition::new("years_experience", "Years of Experience", FieldType::Number),
    FieldDefinition::new("cover_letter", "Cover Letter", FieldType::LongText),
    FieldDefinition::new("photo", "Profile Photo (Gesture)", FieldType::ImageCapture),
];

pub fn find_field(name: &str) -> Option<&'static FieldDefinition> {
    AVAILABLE_FORM_FIELDS.iter().find(|field| field.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique() {
        let names: HashSet<_> = AVAILABLE_FORM_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), AVAILABLE_FORM_FIELDS.len());
    }

    #[test]
    fn only_select_fields_carry_options() {
        for field in AVAILABLE_FORM_FIELDS {
            assert_eq!(
                field.field_type == FieldType::Select,
                !field.options.is_empty(),
                "{}",
                field.name
            );
        }
    }

    #[test]
    fn unknown_names_are_not_found() {
        assert!(find_field("photo").is_some());
        assert!(find_field("shoe_size").is_none());
        assert!(find_field("applicant_name").is_none());
    }
}
