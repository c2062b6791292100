//! # LearnHub Config
//!
//! Configuration types for the LearnHub API, loaded from environment variables
//! (after `dotenvy` has populated them from `.env`).
//!
//! - [`server`]: bind address and application environment
//! - [`jwt`]: token signing secret and lifetime
//! - [`password`]: bcrypt cost
//! - [`uploads`]: image upload directory and limits
//! - [`cors`]: allowed origins
//! - [`seed`]: credentials of the default administrator
//!
//! `PORT`, `JWT_SECRET`, `JWT_EXPIRES_IN` and `SALT_ROUNDS` are required.
//! Loading fails with a [`ConfigError`] when any of them is missing or cannot
//! be parsed, so the binary can refuse to start.
//!
//! Every `from_env` has a `from_lookup` twin taking the variable source as a
//! closure, which is what the tests use.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.addr());
//! ```

pub mod cors;
pub mod duration;
pub mod jwt;
pub mod password;
pub mod seed;
pub mod server;
pub mod uploads;

use std::fmt;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use seed::SeedConfig;
pub use server::{AppEnv, ServerConfig};
pub use uploads::UploadConfig;

/// Source of configuration values, `std::env::var` in production.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set (or is blank).
    Missing(&'static str),

    /// A variable is set but its value is unusable.
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "Missing required environment variable {}", key),
            Self::Invalid { key, value, reason } => {
                write!(f, "Invalid value '{}' for {}: {}", value, key, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn required(lookup: Lookup<'_>, key: &'static str) -> Result<String, ConfigError> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

pub(crate) fn optional(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Everything the server needs, loaded in one go.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub uploads: UploadConfig,
    pub cors: CorsConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_lookup(lookup)?,
            jwt: JwtConfig::from_lookup(lookup)?,
            password: PasswordConfig::from_lookup(lookup)?,
            uploads: UploadConfig::from_lookup(lookup),
            cors: CorsConfig::from_lookup(lookup),
            seed: SeedConfig::from_lookup(lookup),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    pub fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::vars;
    use super::*;

    const REQUIRED: &[(&str, &str)] = &[
        ("PORT", "3000"),
        ("JWT_SECRET", "test-secret"),
        ("JWT_EXPIRES_IN", "7d"),
        ("SALT_ROUNDS", "10"),
    ];

    #[test]
    fn test_loads_with_required_vars() {
        let config = AppConfig::from_lookup(&vars(REQUIRED)).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.jwt.expires_in_secs, 7 * 24 * 3600);
        assert_eq!(config.password.salt_rounds, 10);
        assert_eq!(config.seed.email, "admin@no.com");
    }

    #[test]
    fn test_each_required_var_is_enforced() {
        for (missing, _) in REQUIRED {
            let pairs: Vec<(&str, &str)> = REQUIRED
                .iter()
                .copied()
                .filter(|(key, _)| key != missing)
                .collect();

            let err = AppConfig::from_lookup(&vars(&pairs)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(*missing));
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let lookup = vars(&[("JWT_SECRET", "   ")]);
        assert_eq!(
            required(&lookup, "JWT_SECRET"),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::Missing("PORT").to_string(),
            "Missing required environment variable PORT"
        );
        let invalid = ConfigError::Invalid {
            key: "SALT_ROUNDS",
            value: "ten".to_string(),
            reason: "expected an integer".to_string(),
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid value 'ten' for SALT_ROUNDS: expected an integer"
        );
    }
}
