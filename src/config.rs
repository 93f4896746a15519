// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and is
//! immutable for the lifetime of the process.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TOKEN_SECRET` | HMAC secret used to sign bearer tokens (>= 32 bytes) | Required |
//! | `TOKEN_TTL_SECS` | Bearer token lifetime in seconds | `7200` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Two hours.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 2 * 60 * 60;

/// Minimum accepted signing secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("TOKEN_SECRET must be at least {min} bytes (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Process-wide configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub token_secret: String,
    pub token_ttl: Duration,
    pub log_format: LogFormat,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV) {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let token_secret = lookup(TOKEN_SECRET_ENV).ok_or(ConfigError::Missing(TOKEN_SECRET_ENV))?;
        if token_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: token_secret.len(),
            });
        }

        let ttl_secs = match lookup(TOKEN_TTL_ENV) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: TOKEN_TTL_ENV,
                        value,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(value) => LogFormat::parse(&value).ok_or(ConfigError::Invalid {
                var: LOG_FORMAT_ENV,
                value,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host,
            port,
            token_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            log_format,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[(TOKEN_SECRET_ENV, SECRET)]).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token_ttl, Duration::from_secs(7200));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing(TOKEN_SECRET_ENV));
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = load(&[(TOKEN_SECRET_ENV, "too-short")]).unwrap_err();
        assert_eq!(err, ConfigError::SecretTooShort { min: 32, actual: 9 });
    }

    #[test]
    fn ttl_must_be_positive_integer() {
        for bad in ["0", "-5", "two hours"] {
            let err = load(&[(TOKEN_SECRET_ENV, SECRET), (TOKEN_TTL_ENV, bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { var: TOKEN_TTL_ENV, .. }));
        }

        let config = load(&[(TOKEN_SECRET_ENV, SECRET), (TOKEN_TTL_ENV, "3600")]).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn log_format_and_port_are_parsed() {
        let config = load(&[
            (TOKEN_SECRET_ENV, SECRET),
            (LOG_FORMAT_ENV, "JSON"),
            (PORT_ENV, "9000"),
        ])
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.port, 9000);

        let err = load(&[(TOKEN_SECRET_ENV, SECRET), (PORT_ENV, "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: PORT_ENV, .. }));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = load(&[(TOKEN_SECRET_ENV, SECRET)]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("<redacted>"));
    }
}
