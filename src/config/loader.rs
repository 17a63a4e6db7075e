//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::CatalogueConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
///
/// Relative registry sources are resolved against `base_dir`.
pub fn parse_config(content: &str, base_dir: &Path) -> Result<CatalogueConfig, ConfigError> {
    let mut config: CatalogueConfig = toml::from_str(content)?;
    for source in &mut config.registry.sources {
        if source.is_relative() {
            *source = base_dir.join(&*source);
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CatalogueConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_config(&content, base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config(
            r#"
            [registry]
            sources = ["registry.toml", "/etc/routes/extra.toml"]

            [admin]
            base_path = "/batch"
            "#,
            Path::new("/srv/app"),
        )
        .unwrap();

        assert_eq!(
            config.registry.sources,
            vec![
                PathBuf::from("/srv/app/registry.toml"),
                PathBuf::from("/etc/routes/extra.toml"),
            ]
        );
        assert_eq!(config.admin.base_path.as_deref(), Some("/batch"));
        assert_eq!(config.server.bind_address, "127.0.0.1:8081");
    }

    #[test]
    fn test_validation_error_display() {
        let err = parse_config("[server]\nrequest_timeout_secs = 0", Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 2));
        assert_eq!(
            err.to_string(),
            "Validation failed: server.request_timeout_secs: must be > 0, registry.sources: at least one source is required"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[server\n", Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
