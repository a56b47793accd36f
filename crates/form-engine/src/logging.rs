//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::EngineError;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber.
///
/// Fails when the level is not recognised or a subscriber is already
/// installed; the process keeps running either way.
pub fn init_logging(config: &LoggingConfig) -> Result<(), EngineError> {
    let level = Level::from_str(&config.level)
        .map_err(|_| EngineError::Logging(format!("Unknown log level: {}", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| EngineError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_rejected() {
        let config = LoggingConfig {
            level: "chatty".to_string(),
            json: false,
        };
        assert!(matches!(init_logging(&config), Err(EngineError::Logging(_))));
    }

    #[test]
    fn test_second_install_is_error_not_panic() {
        let config = LoggingConfig::default();
        // Another test may have installed one already; either way the
        // second call must report an error.
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
