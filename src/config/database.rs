//! Database configuration
//!
//! The connection URL is handed to sqlx unchanged, so TLS is controlled by its
//! `sslmode` query parameter. Validation only checks that the mode is one
//! PostgreSQL understands and that production never runs unencrypted.

use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Upper bound for `max_connections`.
const MAX_POOL_SIZE: u32 = 100;

/// PostgreSQL conversation store connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` URL, optionally with `?sslmode=...`
    pub url: String,

    /// Connections kept open while idle
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Hard cap on open connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a request waits for a free connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Seconds before an idle connection is closed
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Seconds before any connection is recycled
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
}

/// `sslmode` values accepted by PostgreSQL clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    /// True when the connection can never fall back to plaintext.
    pub fn is_encrypted(self) -> bool {
        matches!(self, SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull)
    }
}

impl FromStr for SslMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(SslMode::Disable),
            "allow" => Ok(SslMode::Allow),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(ValidationError::InvalidSslMode(other.to_string())),
        }
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// TLS mode requested by the URL. Without `sslmode` clients use `prefer`.
    pub fn ssl_mode(&self) -> Result<SslMode, ValidationError> {
        let query = match self.url.split_once('?') {
            Some((_, query)) => query,
            None => return Ok(SslMode::Prefer),
        };

        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "sslmode")
            .map_or(Ok(SslMode::Prefer), |(_, value)| value.parse())
    }

    /// Validate database configuration for the given environment
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }

        let ssl_mode = self.ssl_mode()?;
        if *environment == Environment::Production && !ssl_mode.is_encrypted() {
            return Err(ValidationError::UnencryptedDatabaseInProduction);
        }

        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_max_lifetime() -> u64 {
    1800
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    mod pool {
        use super::*;

        #[test]
        fn defaults_suit_a_single_instance() {
            let config = DatabaseConfig::default();
            assert_eq!(config.min_connections, 1);
            assert_eq!(config.max_connections, 10);
            assert_eq!(config.acquire_timeout(), Duration::from_secs(10));
            assert_eq!(config.idle_timeout(), Duration::from_secs(300));
            assert_eq!(config.max_lifetime(), Duration::from_secs(1800));
        }

        #[test]
        fn min_above_max_is_rejected() {
            let config = DatabaseConfig {
                min_connections: 10,
                max_connections: 5,
                ..with_url("postgres://localhost/chat")
            };
            assert_eq!(
                config.validate(&Environment::Development),
                Err(ValidationError::InvalidPoolSize)
            );
        }

        #[test]
        fn zero_max_is_rejected() {
            let config = DatabaseConfig {
                min_connections: 0,
                max_connections: 0,
                ..with_url("postgres://localhost/chat")
            };
            assert_eq!(
                config.validate(&Environment::Development),
                Err(ValidationError::InvalidPoolSize)
            );
        }

        #[test]
        fn oversized_pool_is_rejected() {
            let config = DatabaseConfig {
                max_connections: 150,
                ..with_url("postgres://localhost/chat")
            };
            assert_eq!(
                config.validate(&Environment::Development),
                Err(ValidationError::PoolSizeTooLarge)
            );
        }
    }

    mod url {
        use super::*;

        #[test]
        fn missing_url_is_reported() {
            assert_eq!(
                DatabaseConfig::default().validate(&Environment::Development),
                Err(ValidationError::MissingRequired("DATABASE_URL"))
            );
        }

        #[test]
        fn non_postgres_scheme_is_rejected() {
            assert_eq!(
                with_url("mysql://localhost/chat").validate(&Environment::Development),
                Err(ValidationError::InvalidDatabaseUrl)
            );
        }
    }

    mod ssl {
        use super::*;

        #[test]
        fn absent_sslmode_means_prefer() {
            assert_eq!(
                with_url("postgres://localhost/chat").ssl_mode(),
                Ok(SslMode::Prefer)
            );
        }

        #[test]
        fn sslmode_is_read_among_other_params() {
            let config = with_url("postgresql://u:p@db:5432/chat?application_name=x&sslmode=verify-full");
            assert_eq!(config.ssl_mode(), Ok(SslMode::VerifyFull));
        }

        #[test]
        fn unknown_sslmode_is_rejected() {
            let config = with_url("postgres://localhost/chat?sslmode=always");
            assert_eq!(
                config.validate(&Environment::Development),
                Err(ValidationError::InvalidSslMode("always".to_string()))
            );
        }

        #[test]
        fn plaintext_allowed_outside_production() {
            let config = with_url("postgres://localhost/chat?sslmode=disable");
            assert!(config.validate(&Environment::Development).is_ok());
            assert!(config.validate(&Environment::Staging).is_ok());
        }

        #[test]
        fn production_requires_encryption() {
            assert_eq!(
                with_url("postgres://db/chat").validate(&Environment::Production),
                Err(ValidationError::UnencryptedDatabaseInProduction)
            );
            assert!(with_url("postgres://db/chat?sslmode=require")
                .validate(&Environment::Production)
                .is_ok());
        }
    }
}
