use crate::{ConfigError, Lookup, env_lookup, required};

/// bcrypt accepts costs from 4 to 31.
pub const MIN_SALT_ROUNDS: u32 = 4;
pub const MAX_SALT_ROUNDS: u32 = 31;

#[derive(Clone, Copy, Debug)]
pub struct PasswordConfig {
    pub salt_rounds: u32,
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let raw = required(lookup, "SALT_ROUNDS")?;

        let salt_rounds: u32 = raw.parse().map_err(|_| ConfigError::Invalid {
            key: "SALT_ROUNDS",
            value: raw.clone(),
            reason: "expected an integer".to_string(),
        })?;

        if !(MIN_SALT_ROUNDS..=MAX_SALT_ROUNDS).contains(&salt_rounds) {
            return Err(ConfigError::Invalid {
                key: "SALT_ROUNDS",
                value: raw,
                reason: format!("must be between {} and {}", MIN_SALT_ROUNDS, MAX_SALT_ROUNDS),
            });
        }

        Ok(Self { salt_rounds })
    }
}
