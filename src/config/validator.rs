use crate::config::Config;
use crate::error::{LabelError, Result, ValidationError};
use crate::render;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_storage(config, &mut errors);
        Self::validate_labels(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LabelError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_storage(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.data_dir",
                "Data directory path cannot be empty",
            ));
        }
    }

    fn validate_labels(config: &Config, errors: &mut Vec<ValidationError>) {
        let template = &config.labels.template;
        if template.is_empty() {
            errors.push(ValidationError::new(
                "labels.template",
                "Label template cannot be empty",
            ));
            return;
        }

        // Catch malformed templates at load time instead of at the first save
        if let Err(err) = render::check_template(template) {
            errors.push(ValidationError::new("labels.template", err.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_empty_data_dir() {
        let mut config = Config::default();
        config.storage.data_dir = PathBuf::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_malformed_template() {
        let mut config = Config::default();
        config.labels.template = "{{cable.pk".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_empty_template() {
        let mut config = Config::default();
        config.labels.template = String::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
