use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix; nested keys are separated by `__`
/// (`FILECONV_CONVERTER__JPEG_QUALITY=80`).
pub const ENV_PREFIX: &str = "FILECONV_";

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)).merge(env_provider()))
}

/// Load configuration from `path` if given, falling back to defaults plus
/// environment overrides when no file is named
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => extract(Figment::new().merge(env_provider())),
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecisionPolicy;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[log]
dir = "/var/log/fileconv"

[converter]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
jpeg_quality = 75
extra_ffmpeg_args = ["-threads", "2"]

[ui]
decision_policy = "keep"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.log.dir, PathBuf::from("/var/log/fileconv"));
        assert_eq!(config.converter.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.converter.jpeg_quality, 75);
        assert_eq!(config.converter.extra_ffmpeg_args, vec!["-threads", "2"]);
        assert_eq!(config.ui.decision_policy, DecisionPolicy::Keep);
        // Untouched fields keep their defaults
        assert!(config.converter.overwrite);
        assert_eq!(config.ui.event_buffer, 32);
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.log.dir, PathBuf::from("logs"));
        assert_eq!(config.converter.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.ui.decision_policy, DecisionPolicy::Ask);
        assert!(config.ui.start_dir.is_none());
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str("[ui]\ndecision_policy = \"sometimes\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/fileconv.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[converter]
output_dir = "/tmp/converted"
overwrite = false

[ui]
start_dir = "/home/user/Pictures"
show_hidden = true
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(
            config.converter.output_dir,
            Some(PathBuf::from("/tmp/converted"))
        );
        assert!(!config.converter.overwrite);
        assert_eq!(
            config.ui.start_dir,
            Some(PathBuf::from("/home/user/Pictures"))
        );
        assert!(config.ui.show_hidden);
    }

    #[test]
    fn test_load_config_or_default_missing_file_is_error() {
        let result = load_config_or_default(Some(Path::new("/nonexistent/fileconv.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
