use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

mod lifetime;

pub use lifetime::parse_lifetime;

/// Errors raised while building the startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub password_hash_cost: u32,
    pub cors_origins: Vec<String>,
}

// Keep the signing secret out of debug output
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expires_in", &self.jwt_expires_in)
            .field("password_hash_cost", &self.password_hash_cost)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

pub const DEFAULT_JWT_EXPIRES_IN: &str = "7d";
pub const DEFAULT_PASSWORD_HASH_COST: u32 = 10;

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Presets are chosen by `APP_ENV`, then individual variables override
    /// them. Anything that fails to parse is reported instead of silently
    /// falling back to the preset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let expires_in_raw = get("JWT_EXPIRES_IN").unwrap_or_else(|| DEFAULT_JWT_EXPIRES_IN.to_string());
        let jwt_expires_in = parse_lifetime(&expires_in_raw)
            .map_err(|message| ConfigError::invalid("JWT_EXPIRES_IN", message))?;

        let mut config = Self::preset(environment, jwt_secret, jwt_expires_in);

        if let Some(v) = get("HOST") {
            config.server.host = v;
        }
        if let Some(v) = get("PORT") {
            config.server.port = parse_value("PORT", &v)?;
        }

        if let Some(v) = get("STORE_BACKEND") {
            config.database.backend = match v.to_ascii_lowercase().as_str() {
                "postgres" | "postgresql" => StoreBackend::Postgres,
                "memory" => StoreBackend::Memory,
                other => {
                    return Err(ConfigError::invalid(
                        "STORE_BACKEND",
                        format!("expected 'postgres' or 'memory', got '{}'", other),
                    ))
                }
            };
        }
        config.database.url = get("DATABASE_URL");
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = parse_value("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = get("DATABASE_CONNECTION_TIMEOUT") {
            config.database.connection_timeout = parse_value("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }
        if let Some(v) = get("DATABASE_RUN_MIGRATIONS") {
            config.database.run_migrations = parse_value("DATABASE_RUN_MIGRATIONS", &v)?;
        }

        if let Some(v) = get("API_ENABLE_REQUEST_LOGGING") {
            config.api.enable_request_logging = parse_value("API_ENABLE_REQUEST_LOGGING", &v)?;
        }
        if let Some(v) = get("API_MAX_REQUEST_SIZE_BYTES") {
            config.api.max_request_size_bytes = parse_value("API_MAX_REQUEST_SIZE_BYTES", &v)?;
        }

        if let Some(v) = get("PASSWORD_HASH_COST") {
            let cost: u32 = parse_value("PASSWORD_HASH_COST", &v)?;
            if !(4..=31).contains(&cost) {
                return Err(ConfigError::invalid("PASSWORD_HASH_COST", "must be between 4 and 31"));
            }
            config.security.password_hash_cost = cost;
        }
        if let Some(v) = get("SECURITY_CORS_ORIGINS") {
            config.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.backend == StoreBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", "must be at least 1"));
        }
        Ok(())
    }

    fn preset(environment: Environment, jwt_secret: String, jwt_expires_in: Duration) -> Self {
        let (max_connections, connection_timeout, run_migrations, request_logging, max_body, origins) =
            match environment {
                Environment::Development => (
                    10,
                    30,
                    true,
                    true,
                    1024 * 1024,
                    vec!["*".to_string()],
                ),
                Environment::Staging => (
                    20,
                    10,
                    true,
                    true,
                    256 * 1024,
                    vec!["https://staging.example.com".to_string()],
                ),
                Environment::Production => (
                    50,
                    5,
                    false,
                    false,
                    64 * 1024,
                    vec!["https://app.example.com".to_string()],
                ),
            };

        Self {
            environment,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                max_connections,
                connection_timeout,
                run_migrations,
            },
            api: ApiConfig {
                enable_request_logging: request_logging,
                max_request_size_bytes: max_body,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expires_in,
                password_hash_cost: DEFAULT_PASSWORD_HASH_COST,
                cors_origins: origins,
            },
        }
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_secret_is_a_startup_error() {
        let err = AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn defaults_to_seven_day_tokens() {
        let config =
            AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret"), ("STORE_BACKEND", "memory")]))
                .unwrap();
        assert_eq!(config.security.jwt_expires_in, Duration::from_secs(7 * 24 * 3600));
        assert_eq!(config.security.password_hash_cost, DEFAULT_PASSWORD_HASH_COST);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("STORE_BACKEND", "memory"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("STORE_BACKEND", "memory"),
            ("JWT_EXPIRES_IN", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_EXPIRES_IN", .. }));
    }

    #[test]
    fn production_preset_with_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/sensors"),
            ("DATABASE_MAX_CONNECTIONS", "8"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.database.run_migrations);
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(
            config.security.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let config =
            AppConfig::from_lookup(lookup(&[("JWT_SECRET", "hunter2"), ("STORE_BACKEND", "memory")]))
                .unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
