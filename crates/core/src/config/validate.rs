use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - converter.jpeg_quality is within 1..=100
/// - ffmpeg and heif-convert paths are not empty
/// - ui.event_buffer is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let converter = &config.converter;

    if !(1..=100).contains(&converter.jpeg_quality) {
        return Err(ConfigError::ValidationError(format!(
            "converter.jpeg_quality must be between 1 and 100, got {}",
            converter.jpeg_quality
        )));
    }

    if converter.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if converter.heif_convert_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.heif_convert_path cannot be empty".to_string(),
        ));
    }

    if config.ui.event_buffer == 0 {
        return Err(ConfigError::ValidationError(
            "ui.event_buffer cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_jpeg_quality_out_of_range() {
        let mut config = Config::default();
        config.converter.jpeg_quality = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));

        config.converter.jpeg_quality = 101;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));
    }

    #[test]
    fn test_validate_empty_tool_path() {
        let mut config = Config::default();
        config.converter.ffmpeg_path = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_event_buffer_zero() {
        let mut config = Config::default();
        config.ui.event_buffer = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("event_buffer"));
    }
}
