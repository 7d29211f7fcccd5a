//! API runtime configuration.
//!
//! Resolved once at startup and passed into the router, so request handling
//! never reads process environment.

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE_PATH: &str = "clinic.db";
/// Local frontend dev servers.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];

/// Path value that selects an in-memory store.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} cannot be empty")]
    Empty { name: &'static str },

    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

/// Allowed cross-origin callers.
#[derive(Clone, Debug, PartialEq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// API configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub cors_origins: CorsOrigins,
}

impl ApiConfig {
    /// Read configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `CLINIC_BIND_ADDR`: Server address (default: "0.0.0.0:8000")
    /// - `CLINIC_DATABASE_PATH`: SQLite file, or ":memory:" (default: "clinic.db")
    /// - `CLINIC_CORS_ORIGINS`: Comma-separated origins, or "*" (default: local frontend)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("CLINIC_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        if bind_addr.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: "CLINIC_BIND_ADDR",
            });
        }

        let database_path =
            lookup("CLINIC_DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.into());
        if database_path.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: "CLINIC_DATABASE_PATH",
            });
        }

        let cors_origins = match lookup("CLINIC_CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => parse_origins(&DEFAULT_CORS_ORIGINS.join(","))?,
        };

        Ok(Self {
            bind_addr,
            database_path,
            cors_origins,
        })
    }

    pub fn uses_in_memory_database(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }
}

fn parse_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    if raw.trim() == "*" {
        return Ok(CorsOrigins::Any);
    }

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::Empty {
            name: "CLINIC_CORS_ORIGINS",
        });
    }
    Ok(CorsOrigins::List(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert!(!config.uses_in_memory_database());
        match config.cors_origins {
            CorsOrigins::List(origins) => assert_eq!(origins.len(), 2),
            CorsOrigins::Any => panic!("expected explicit origins"),
        }
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("CLINIC_BIND_ADDR", "127.0.0.1:9000"),
            ("CLINIC_DATABASE_PATH", ":memory:"),
            ("CLINIC_CORS_ORIGINS", "*"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert!(config.uses_in_memory_database());
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn test_origin_list_is_trimmed() {
        let config = ApiConfig::from_lookup(lookup_from(&[(
            "CLINIC_CORS_ORIGINS",
            " https://clinic.example , ,http://localhost:3000",
        )]))
        .unwrap();
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                HeaderValue::from_static("https://clinic.example"),
                HeaderValue::from_static("http://localhost:3000"),
            ])
        );
    }

    #[test]
    fn test_rejects_empty_values() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup_from(&[("CLINIC_DATABASE_PATH", " ")])),
            Err(ConfigError::Empty { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup_from(&[("CLINIC_CORS_ORIGINS", ",")])),
            Err(ConfigError::Empty { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup_from(&[("CLINIC_CORS_ORIGINS", "bad\norigin")])),
            Err(ConfigError::InvalidOrigin(_))
        ));
    }
}
