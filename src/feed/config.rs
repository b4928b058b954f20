//! Aggregator credentials and environment selection.
//!
//! Loaded from environment variables at startup. A missing or invalid value
//! is fatal to the fetch path only: the server still starts and the
//! dashboard renders with zeroed totals and a warning.

use std::{env, str::FromStr};

use crate::reconcile::SignConvention;

/// Environment variable holding the aggregator client ID.
pub const ENV_CLIENT_ID: &str = "FEED_CLIENT_ID";
/// Environment variable holding the aggregator secret.
pub const ENV_SECRET: &str = "FEED_SECRET";
/// Environment variable holding the access token for the linked bank item.
pub const ENV_ACCESS_TOKEN: &str = "FEED_ACCESS_TOKEN";
/// Environment variable selecting the aggregator environment.
pub const ENV_ENVIRONMENT: &str = "FEED_ENV";

/// An error loading the feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable was not set or was empty.
    #[error("the environment variable '{0}' must be set")]
    MissingVar(&'static str),

    /// The selected environment is not one of sandbox, development, or
    /// production.
    #[error("invalid feed environment \"{0}\", use one of: sandbox, development, production")]
    InvalidEnvironment(String),
}

/// The aggregator environment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedEnvironment {
    /// Test environment with synthetic data.
    #[default]
    Sandbox,
    /// Development environment with live credentials but limited items.
    Development,
    /// Live environment.
    Production,
}

impl FeedEnvironment {
    /// The base URL for this environment's API host.
    pub fn base_url(&self) -> &'static str {
        match self {
            FeedEnvironment::Sandbox => "https://sandbox.plaid.com",
            FeedEnvironment::Development => "https://development.plaid.com",
            FeedEnvironment::Production => "https://production.plaid.com",
        }
    }
}

impl FromStr for FeedEnvironment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "sandbox" => Ok(FeedEnvironment::Sandbox),
            "development" => Ok(FeedEnvironment::Development),
            "production" => Ok(FeedEnvironment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_owned())),
        }
    }
}

/// Credentials and environment for the aggregation API.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// The aggregator client ID.
    pub client_id: String,
    /// The aggregator secret.
    pub secret: String,
    /// The access token identifying the linked bank item.
    pub access_token: String,
    /// Which aggregator host to talk to.
    pub environment: FeedEnvironment,
    /// The polarity the aggregator uses for raw amounts. The aggregator
    /// reports positive amounts for money leaving the account.
    pub sign_convention: SignConvention,
}

impl FeedConfig {
    /// Load the configuration from environment variables.
    ///
    /// `FEED_ENV` defaults to sandbox when unset; the credential variables
    /// are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var(ENV_ENVIRONMENT) {
            Ok(value) if !value.is_empty() => value.parse()?,
            _ => FeedEnvironment::default(),
        };

        Ok(Self {
            client_id: require_var(ENV_CLIENT_ID)?,
            secret: require_var(ENV_SECRET)?,
            access_token: require_var(ENV_ACCESS_TOKEN)?,
            environment,
            sign_convention: SignConvention::DebitPositive,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
