//! Logging setup for the Conforma CLI
//!
//! Maps `-v` verbosity to a tracing level, honoring `RUST_LOG` when set.

use crate::error::{Error, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Include file and line numbers
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();
        match verbosity {
            0 => config.level = "warn".to_string(),
            1 => config.level = "info".to_string(),
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.source_location = true;
            }
        }
        config
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    // RUST_LOG takes precedence over the verbosity-derived level.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LoggingConfig::from_verbosity(0).level, "warn");
        assert_eq!(LoggingConfig::from_verbosity(1).level, "info");
        assert_eq!(LoggingConfig::from_verbosity(2).level, "debug");
        assert_eq!(LoggingConfig::from_verbosity(5).level, "trace");
        assert!(LoggingConfig::from_verbosity(2).source_location);
    }
}
