use std::collections::HashSet;
use validator::ValidationError;

use crate::error::{Error, Result};
use crate::models::form_config::FormFieldConfig;

/// Rejects strings made only of whitespace.
pub fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A job may declare each field at most once.
pub fn ensure_unique_field_names(configs: &[FormFieldConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for config in configs {
        if !seen.insert(config.field_name.as_str()) {
            return Err(Error::BadRequest(format!(
                "Field '{}' is configured more than once",
                config.field_name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form_config::FieldRequirement;

    #[test]
    fn duplicate_field_names_are_rejected() {
        let configs = vec![
            FormFieldConfig::new("phone", FieldRequirement::Mandatory),
            FormFieldConfig::new("phone", FieldRequirement::Optional),
        ];
        assert!(matches!(
            ensure_unique_field_names(&configs),
            Err(Error::BadRequest(_))
        ));
        assert!(ensure_unique_field_names(&configs[..1]).is_ok());
    }

    #[test]
    fn blank_strings_fail() {
        assert!(not_blank("  ").is_err());
        assert!(not_blank("Engineer").is_ok());
    }
}
