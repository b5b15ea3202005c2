use crate::{
    Error, Result,
    config::{LogFormat, LogsConfig},
};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Resolves the effective log level: `RUST_LOG` overrides the configured one.
pub fn resolve_level(logs: &LogsConfig) -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| logs.level.clone())
}

/// Validates that a log level string is valid
pub fn validate_log_level(level: &str) -> Result<()> {
    level.parse::<LevelFilter>().map_err(|_| {
        Error::config(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        ))
    })?;
    Ok(())
}

/// Installs the global tracing subscriber. Call once, at process start.
pub fn init(level: &str, format: LogFormat) -> Result<()> {
    validate_log_level(level)?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level));
    let filter = filter.map_err(|e| Error::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| Error::internal(format!("Failed to install logger: {}", e)))
}
