//! Application configuration module
//!
//! Configuration comes from environment variables (after an optional `.env`
//! file has been loaded by the binary). Tests build it directly with
//! [`AppConfig::builder`].

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOCK_TTL_SECS: u64 = 5 * 60;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:4200";
pub const DEFAULT_BROADCAST_CAPACITY: usize = 1000;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEV_JWT_SECRET: &str = "contacthub-dev-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    pub server_port: u16,
    /// PostgreSQL URL; `None` selects the in-memory stores
    pub database_url: Option<String>,
    /// HMAC secret for signing session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// How long an untouched record lock stays valid
    pub lock_ttl: Duration,
    /// Interval of the expired-lock reaper; `None` disables it
    pub lock_reaper_interval: Option<Duration>,
    /// Origin allowed by CORS
    pub frontend_url: String,
    /// Create the default `user1`/`user2` accounts at startup
    pub seed_default_users: bool,
    /// Buffered events per realtime subscriber before it lags
    pub broadcast_capacity: usize,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            lock_ttl: Duration::from_secs(DEFAULT_LOCK_TTL_SECS),
            lock_reaper_interval: None,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            seed_default_users: true,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("[Config] JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }
        };

        let reaper_secs = parse_or("LOCK_REAPER_INTERVAL_SECS", get("LOCK_REAPER_INTERVAL_SECS"), 0u64)?;

        let config = Self {
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), defaults.server_port)?,
            database_url: get("DATABASE_URL"),
            jwt_secret,
            token_ttl: Duration::from_secs(parse_or(
                "JWT_EXPIRES_IN_SECS",
                get("JWT_EXPIRES_IN_SECS"),
                DEFAULT_TOKEN_TTL_SECS,
            )?),
            lock_ttl: Duration::from_secs(parse_or(
                "LOCK_TTL_SECS",
                get("LOCK_TTL_SECS"),
                DEFAULT_LOCK_TTL_SECS,
            )?),
            lock_reaper_interval: (reaper_secs > 0).then(|| Duration::from_secs(reaper_secs)),
            frontend_url: get("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            seed_default_users: parse_or(
                "SEED_DEFAULT_USERS",
                get("SEED_DEFAULT_USERS"),
                defaults.seed_default_users,
            )?,
            broadcast_capacity: parse_or(
                "BROADCAST_CAPACITY",
                get("BROADCAST_CAPACITY"),
                defaults.broadcast_capacity,
            )?,
            bcrypt_cost: parse_or("BCRYPT_COST", get("BCRYPT_COST"), defaults.bcrypt_cost)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lock_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "LOCK_TTL_SECS",
                value: "0".to_string(),
            });
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "BROADCAST_CAPACITY",
                value: "0".to_string(),
            });
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.config.token_ttl = ttl;
        self
    }

    pub fn lock_ttl(mut self, ttl: Duration) -> Self {
        self.config.lock_ttl = ttl;
        self
    }

    pub fn lock_reaper_interval(mut self, interval: Duration) -> Self {
        self.config.lock_reaper_interval = Some(interval);
        self
    }

    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.config.frontend_url = url.into();
        self
    }

    pub fn seed_default_users(mut self, seed: bool) -> Self {
        self.config.seed_default_users = seed;
        self
    }

    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.config.broadcast_capacity = capacity;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
