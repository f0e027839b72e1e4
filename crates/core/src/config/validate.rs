use super::{types::Config, ConfigError};

/// Backend accepts `top_k` in this range only.
const TOP_K_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Validate configuration
/// Currently validates:
/// - Explicit base URL, when set, is an http(s) URL
/// - Fallback port is not 0
/// - Timeouts are non-zero
/// - top_k is within the backend's accepted range
/// - Query length limit is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let Some(base_url) = &config.api.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must start with http:// or https://, got {:?}",
                base_url
            )));
        }
    }

    if config.api.fallback_port == 0 {
        return Err(ConfigError::ValidationError(
            "api.fallback_port cannot be 0".to_string(),
        ));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.orchestrator.request_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "orchestrator.request_timeout_ms cannot be 0".to_string(),
        ));
    }

    if !TOP_K_RANGE.contains(&config.orchestrator.top_k) {
        return Err(ConfigError::ValidationError(format!(
            "orchestrator.top_k must be between {} and {}, got {}",
            TOP_K_RANGE.start(),
            TOP_K_RANGE.end(),
            config.orchestrator.top_k
        )));
    }

    if config.policy.max_query_chars == 0 {
        return Err(ConfigError::ValidationError(
            "policy.max_query_chars cannot be 0".to_string(),
        ));
    }

    Ok(())
}
