use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Heartbeat interval and channel capacity are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.ws.heartbeat_secs == 0 {
        return Err(ConfigError::ValidationError(
            "ws.heartbeat_secs cannot be 0".to_string(),
        ));
    }

    // tokio's broadcast channel panics on a zero capacity
    if config.ws.channel_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "ws.channel_capacity cannot be 0".to_string(),
        ));
    }

    Ok(())
}
