use std::{net::SocketAddr, str::FromStr};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_JWT_EXPIRES_IN_SECS: i64 = 3600;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Token bucket settings for one rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Seconds until one request slot is replenished.
    pub replenish_secs: u64,
    /// Requests a client may make in a burst.
    pub burst: u32,
}

pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,
    pub jwt_expires_in_secs: i64,

    pub host: String,
    pub port: u16,

    pub upload_dir: String,
    /// Allowed CORS origin. `None` allows any origin.
    pub cors_origin: Option<String>,

    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,

    pub rate_limit: RateLimit,
    pub auth_rate_limit: RateLimit,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expires_in_secs: optional("JWT_EXPIRES_IN_SECS", DEFAULT_JWT_EXPIRES_IN_SECS)?,
            host: optional("HOST", DEFAULT_HOST.to_string())?,
            port: optional("PORT", DEFAULT_PORT)?,
            upload_dir: optional("UPLOAD_DIR", DEFAULT_UPLOAD_DIR.to_string())?,
            cors_origin: std::env::var("CORS_ORIGIN")
                .ok()
                .filter(|origin| !origin.is_empty() && origin != "*"),
            cache_ttl_secs: optional("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            cache_capacity: optional("CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?,
            rate_limit: RateLimit {
                replenish_secs: optional("RATE_LIMIT_REPLENISH_SECS", 1)?,
                burst: optional("RATE_LIMIT_BURST", 100)?,
            },
            auth_rate_limit: RateLimit {
                replenish_secs: optional("AUTH_RATE_LIMIT_REPLENISH_SECS", 720)?,
                burst: optional("AUTH_RATE_LIMIT_BURST", 5)?,
            },
        })
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse::<SocketAddr>().map_err(|_| {
            ConfigError::InvalidEnvVar {
                name: "HOST".to_string(),
                value: self.host.clone(),
            }
            .into()
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
