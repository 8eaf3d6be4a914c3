use std::env;
use std::str::FromStr;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub currency: CurrencyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_ttl_minutes() -> i64 {
    15
}

fn default_currency_base_url() -> String {
    "https://api.apilayer.com/currency_data".to_string()
}

/// Algorithms usable with a symmetric secret. Anything else configured is a
/// deployment error.
const HMAC_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails when a required field is missing or when the signing setup is
    /// unusable; the caller must treat this as fatal rather than fall back
    /// to an insecure default.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set; refusing to start without a signing key".to_string(),
            ));
        }

        if !HMAC_ALGORITHMS.contains(&self.jwt.algorithm.as_str()) {
            return Err(ConfigError::Message(format!(
                "jwt.algorithm must be one of {:?}, got {:?}",
                HMAC_ALGORITHMS, self.jwt.algorithm
            )));
        }

        Ok(())
    }
}

impl JwtConfig {
    /// Parsed signing algorithm. Cannot fail after `Config::load` has
    /// validated the name.
    pub fn algorithm(&self) -> Result<Algorithm, ConfigError> {
        Algorithm::from_str(&self.algorithm).map_err(|e| ConfigError::Message(e.to_string()))
    }

    /// Token lifetime as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.ttl_minutes)
    }
}
