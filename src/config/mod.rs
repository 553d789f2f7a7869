use once_cell::sync::OnceCell;
use serde::{Serialize, Serializer};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Upper bound for `SECURITY_SESSION_EXPIRY_HOURS` (one year)
pub const MAX_SESSION_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    #[serde(serialize_with = "redact_url")]
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub auth_secret: String,
    pub session_expiry_hours: u64,
    pub secure_cookies: bool,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// `DATABASE_URL` and `AUTH_SECRET` have no defaults; startup fails without them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let mut config = Self::preset(environment).with_env_overrides()?;

        config.database.url = env::var("DATABASE_URL").unwrap_or_default();
        config.security.auth_secret = env::var("AUTH_SECRET").unwrap_or_default();

        config.validate()?;
        Ok(config)
    }

    /// Defaults for an environment, without any secrets filled in.
    pub fn preset(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if self.security.auth_secret.trim().is_empty() {
            return Err(ConfigError::Missing("AUTH_SECRET"));
        }
        let expiry = self.security.session_expiry_hours;
        if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&expiry) {
            return Err(ConfigError::Invalid {
                key: "SECURITY_SESSION_EXPIRY_HOURS",
                value: expiry.to_string(),
            });
        }
        Ok(())
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // BO_PORT wins over the generic PORT used by most hosts
        if let Some(v) = env::var("BO_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = parse("PORT", &v)?;
        }
        if let Ok(v) = env::var("BO_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = parse("API_ENABLE_REQUEST_LOGGING", &v)?;
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        if let Ok(v) = env::var("SECURITY_SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours = parse("SECURITY_SESSION_EXPIRY_HOURS", &v)?;
        }
        if let Ok(v) = env::var("SECURITY_SECURE_COOKIES") {
            self.security.secure_cookies = parse("SECURITY_SECURE_COOKIES", &v)?;
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 5,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                session_expiry_hours: 24 * 7,
                secure_cookies: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                session_expiry_hours: 24,
                secure_cookies: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                auth_secret: String::new(),
                session_expiry_hours: 12,
                secure_cookies: true,
            },
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn redact_url<S: Serializer>(raw: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match url::Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("****"));
            }
            serializer.serialize_str(url.as_str())
        }
        Err(_) if raw.is_empty() => serializer.serialize_str(""),
        Err(_) => serializer.serialize_str("<invalid>"),
    }
}

// Process-wide config, loaded once by the binaries
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

pub fn init() -> Result<&'static AppConfig, ConfigError> {
    CONFIG.get_or_try_init(AppConfig::from_env)
}
