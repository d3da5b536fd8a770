//! Server configuration loaded from environment variables.

use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Deployment environment reported by `/health`.
    pub environment: String,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads `HOST`, `PORT`, `APP_ENV` and `LOG_LEVEL`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
