use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `STYLEFINDER_API__BASE_URL`.
const ENV_PREFIX: &str = "STYLEFINDER_";

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from defaults plus environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    Figment::new()
        .merge(env_provider())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[orchestrator]
top_k = 8
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.orchestrator.top_k, 8);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[api]
fallback_port = "eight thousand"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/stylefinder.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[api]
base_url = "http://127.0.0.1:9000"

[orchestrator]
request_timeout_ms = 2500
"#
        )
        .unwrap();

        // Jail serializes access to the process environment.
        figment::Jail::expect_with(|_jail| {
            let config = load_config(temp_file.path()).map_err(|e| e.to_string())?;
            assert_eq!(config.api.base_url.as_deref(), Some("http://127.0.0.1:9000"));
            assert_eq!(config.orchestrator.request_timeout_ms, 2500);
            assert_eq!(config.orchestrator.top_k, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "stylefinder.toml",
                r#"
[api]
base_url = "http://from-file:8000"
fallback_port = 9001
"#,
            )?;
            jail.set_env("STYLEFINDER_API__BASE_URL", "http://from-env:8000");

            let config = load_config(Path::new("stylefinder.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.api.base_url.as_deref(), Some("http://from-env:8000"));
            assert_eq!(config.api.fallback_port, 9001);
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_env_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STYLEFINDER_ORCHESTRATOR__TOP_K", "3");

            let config = load_config_from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.orchestrator.top_k, 3);
            assert!(config.api.base_url.is_none());
            Ok(())
        });
    }
}
