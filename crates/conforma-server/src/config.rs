//! HTTP server configuration
//!
//! Bind address and CORS settings, with environment overrides.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (empty: permissive, for development)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Build a config from the environment (`CONFORMA_HOST`,
    /// `CONFORMA_PORT`, `CONFORMA_CORS_ORIGINS` comma-separated),
    /// falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("CONFORMA_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("CONFORMA_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!("Invalid CONFORMA_PORT '{}', using default", port),
            }
        }
        if let Ok(origins) = std::env::var("CONFORMA_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        config
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
