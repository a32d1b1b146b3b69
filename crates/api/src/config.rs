//! Process configuration read from environment variables.

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEV_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("{0} must be set together with {1}")]
    Incomplete(&'static str, &'static str),
}

/// Credentials of the admin account created at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

/// Argon2 cost override (memory in KiB, iterations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCost {
    pub memory_kib: u32,
    pub iterations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub admin_seed: Option<AdminSeed>,
    /// `None` keeps the argon2 library defaults.
    pub password_cost: Option<PasswordCost>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("HBNB_BIND_ADDR") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "HBNB_BIND_ADDR",
                value: raw,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl = match get("HBNB_TOKEN_TTL_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => Duration::minutes(minutes),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HBNB_TOKEN_TTL_MINUTES",
                        value: raw,
                    });
                }
            },
            None => Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        };

        let admin_seed = match (get("HBNB_ADMIN_EMAIL"), get("HBNB_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Incomplete("HBNB_ADMIN_EMAIL", "HBNB_ADMIN_PASSWORD"));
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete("HBNB_ADMIN_PASSWORD", "HBNB_ADMIN_EMAIL"));
            }
        };

        let password_cost = match (get("HBNB_ARGON2_MEMORY_KIB"), get("HBNB_ARGON2_ITERATIONS")) {
            (None, None) => None,
            (memory, iterations) => Some(PasswordCost {
                memory_kib: parse_u32("HBNB_ARGON2_MEMORY_KIB", memory, 19 * 1024)?,
                iterations: parse_u32("HBNB_ARGON2_ITERATIONS", iterations, 2)?,
            }),
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl,
            admin_seed,
            password_cost,
        })
    }

    /// In-process settings for tests: random port, cheap hashing, no seed.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.to_string(),
            token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            admin_seed: None,
            password_cost: Some(PasswordCost {
                memory_kib: 1024,
                iterations: 1,
            }),
        }
    }
}

fn parse_u32(key: &'static str, raw: Option<String>, default: u32) -> Result<u32, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::Invalid { key, value }),
        },
    }
}
