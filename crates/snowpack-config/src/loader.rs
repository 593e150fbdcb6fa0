use snowpack_core::config::SnowpackConfig;
use thiserror::Error;

use crate::validator::{validate_config, ValidationError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse snowpack config RON: {0}")]
    ConfigParseError(String),
}

/// Loading plus validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Snowpack config failed validation: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a RON document into a config. Missing keys take their defaults.
pub fn load_config_from_str(ron_str: &str) -> Result<SnowpackConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::ConfigParseError(e.to_string()))
}

/// Parse and validate in one step.
pub fn load_validated(ron_str: &str) -> Result<SnowpackConfig, ConfigError> {
    let config = load_config_from_str(ron_str)?;
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            log::warn!("Config rejected: {error}");
        }
        return Err(ConfigError::Invalid(errors));
    }
    Ok(config)
}

/// Serialize a config back to pretty RON (for dumping the effective config).
pub fn config_to_string(config: &SnowpackConfig) -> Result<String, LoadError> {
    ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .map_err(|e| LoadError::ConfigParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowpack_core::types::PaintMode;

    #[test]
    fn test_empty_document_is_default() {
        let config = load_config_from_str("()").expect("should parse");
        assert_eq!(config, SnowpackConfig::default());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let ron = r#"(
            field: (resolution: 64),
            thermal: (ambient_temperature: 4.0, raining: true),
            paint_mode: Deferred,
        )"#;
        let config = load_config_from_str(ron).expect("should parse");
        assert_eq!(config.field.resolution, 64);
        assert_eq!(config.field.world_size, SnowpackConfig::default().field.world_size);
        assert_eq!(config.thermal.ambient_temperature, 4.0);
        assert!(config.thermal.raining);
        assert_eq!(config.thermal.time_scale, SnowpackConfig::default().thermal.time_scale);
        assert_eq!(config.paint_mode, PaintMode::Deferred);
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let result = load_config_from_str(r#"(field: (resolution: "lots"))"#);
        assert!(matches!(result, Err(LoadError::ConfigParseError(_))));
        assert!(load_config_from_str("(this is not valid RON {").is_err());
    }

    #[test]
    fn test_load_validated_rejects_zero_resolution() {
        let err = load_validated("(field: (resolution: 0))").unwrap_err();
        match err {
            ConfigError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(errors[0], ValidationError::ResolutionOutOfRange { .. }));
            }
            other => panic!("expected validation failure, got {other}"),
        }
    }

    #[test]
    fn test_load_validated_reports_parse_errors() {
        let err = load_validated("(field: [").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_round_trip_through_string() {
        let mut config = SnowpackConfig::default();
        config.field.resolution = 128;
        config.thermal.dead_band = 0.25;
        let text = config_to_string(&config).expect("should serialize");
        let back = load_config_from_str(&text).expect("should parse");
        assert_eq!(back, config);
    }
}
