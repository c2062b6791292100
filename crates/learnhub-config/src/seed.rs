use crate::{Lookup, env_lookup, optional};

/// The administrator account created at startup when it does not exist yet.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl SeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let defaults = Self::default();
        Self {
            email: optional(lookup, "ADMIN_EMAIL").unwrap_or(defaults.email),
            password: optional(lookup, "ADMIN_PASSWORD").unwrap_or(defaults.password),
            name: optional(lookup, "ADMIN_NAME").unwrap_or(defaults.name),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            email: "admin@no.com".to_string(),
            password: "admin123".to_string(),
            name: "System Administrator".to_string(),
        }
    }
}
