use crate::duration::parse_duration_secs;
use crate::{ConfigError, Lookup, env_lookup, required};

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub expires_in_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let secret = required(lookup, "JWT_SECRET")?;
        let raw_expiry = required(lookup, "JWT_EXPIRES_IN")?;

        let expires_in_secs =
            parse_duration_secs(&raw_expiry).map_err(|reason| ConfigError::Invalid {
                key: "JWT_EXPIRES_IN",
                value: raw_expiry.clone(),
                reason,
            })?;

        Ok(Self {
            secret,
            expires_in_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::vars;

    #[test]
    fn test_parses_expiry() {
        let config = JwtConfig::from_lookup(&vars(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRES_IN", "15m"),
        ]))
        .unwrap();

        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.expires_in_secs, 900);
    }

    #[test]
    fn test_invalid_expiry() {
        let err = JwtConfig::from_lookup(&vars(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRES_IN", "soon"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "JWT_EXPIRES_IN",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_expiry_beyond_cap() {
        let err = JwtConfig::from_lookup(&vars(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRES_IN", "9223372036854775807"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "JWT_EXPIRES_IN",
                ..
            }
        ));
    }
}
