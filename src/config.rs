//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct,
//! then checks the values that `envy` cannot check on its own (token lifetime, CORS origins).

use chrono::Duration;
use serde::Deserialize;

use crate::middleware::cors::OriginRule;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 5000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `JWT_SECRET` (required): HMAC secret used to sign access tokens
/// - `JWT_EXPIRES_IN` (optional): token lifetime such as `90d`, `12h`, `30m`, defaults to `90d`
/// - `CORS_ORIGINS` (optional): comma separated list of allowed origins
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    pub jwt_secret: String,

    #[serde(default = "default_jwt_expires_in")]
    pub jwt_expires_in: String,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    5
}

fn default_jwt_expires_in() -> String {
    "90d".to_string()
}

/// Local development front-ends plus any Vercel preview deployment.
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "https://*.vercel.app".to_string(),
    ]
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL, JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    /// - The token lifetime or an allowed origin is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        let config = envy::from_env::<Config>()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET must not be empty".to_string()));
        }
        self.token_ttl()?;
        self.origin_rules()?;
        Ok(())
    }

    /// Lifetime of issued access tokens.
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.jwt_expires_in)
    }

    /// Parsed CORS allow-list.
    pub fn origin_rules(&self) -> Result<Vec<OriginRule>, ConfigError> {
        self.cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                OriginRule::parse(origin).ok_or_else(|| {
                    ConfigError::Invalid(format!("invalid CORS origin '{origin}'"))
                })
            })
            .collect()
    }
}

/// Parse a lifetime such as `3600`, `45s`, `30m`, `12h` or `90d`.
///
/// A bare number is read as seconds. Zero is rejected because such a token
/// would be expired on issue.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::Invalid(format!("invalid token lifetime '{value}'"));

    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);
    let amount: i64 = digits.parse().map_err(|_| invalid())?;

    let duration = match unit {
        "" | "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        _ => None,
    }
    .ok_or_else(invalid)?;

    if duration <= Duration::zero() {
        return Err(invalid());
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "postgres://localhost/finance".to_string(),
            server_port: default_port(),
            database_max_connections: default_max_connections(),
            jwt_secret: "secret".to_string(),
            jwt_expires_in: default_jwt_expires_in(),
            cors_origins: default_cors_origins(),
        }
    }

    #[test]
    fn parses_token_lifetimes() {
        assert_eq!(parse_duration("90d").unwrap(), Duration::days(90));
        assert_eq!(parse_duration("12h").unwrap(), Duration::hours(12));
        assert_eq!(parse_duration("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_duration("45s").unwrap(), Duration::seconds(45));
        assert_eq!(parse_duration("3600").unwrap(), Duration::seconds(3600));
    }

    #[test]
    fn rejects_malformed_lifetimes() {
        for value in ["", "d", "0", "10w", "-5m", "1.5h"] {
            assert!(parse_duration(value).is_err(), "accepted '{value}'");
        }
    }

    #[test]
    fn default_config_is_valid() {
        let config = config();
        assert!(config.validate().is_ok());
        assert_eq!(config.origin_rules().unwrap().len(), 3);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let config = Config {
            jwt_secret: "  ".to_string(),
            ..config()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_origin_is_rejected() {
        let config = Config {
            cors_origins: vec!["not a url".to_string()],
            ..config()
        };
        assert!(config.origin_rules().is_err());
    }
}
