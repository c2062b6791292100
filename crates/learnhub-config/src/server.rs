use std::fmt;

use crate::{ConfigError, Lookup, env_lookup, optional, required};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl AppEnv {
    pub fn is_development(self) -> bool {
        self == AppEnv::Development
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppEnv::Development => "development",
            AppEnv::Production => "production",
            AppEnv::Test => "test",
        })
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub env: AppEnv,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let raw_port = required(lookup, "PORT")?;
        let port = raw_port.parse().map_err(|_| ConfigError::Invalid {
            key: "PORT",
            value: raw_port.clone(),
            reason: "expected a port number".to_string(),
        })?;

        let env = match optional(lookup, "APP_ENV").as_deref() {
            None | Some("development") => AppEnv::Development,
            Some("production") => AppEnv::Production,
            Some("test") => AppEnv::Test,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "APP_ENV",
                    value: other.to_string(),
                    reason: "expected development, production or test".to_string(),
                });
            }
        };

        Ok(Self {
            host: optional(lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            env,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
