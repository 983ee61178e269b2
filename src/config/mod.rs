//! Configuration module for handling environment variables and .env files

use crate::client::{RedditClient, RedditClientError, DEFAULT_USER_AGENT};
use dotenv::dotenv;
use log::{info, warn};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Reddit API credentials
    pub client_id: Option<String>,
    pub access_token: Option<String>,

    // Reddit API settings
    pub user_agent: String,
    pub api_base: Option<Url>,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            access_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Self {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenv() {
            Ok(_) => info!("Loaded environment from .env file"),
            Err(_) => info!("No .env file found, using system environment variables only"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, e.g. the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.client_id = lookup("REDDIT_CLIENT_ID");
        config.access_token = lookup("REDDIT_ACCESS_TOKEN");

        // User agent - use environment variable if available, otherwise use default
        if let Some(user_agent) = lookup("REDDIT_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Some(base) = lookup("REDDIT_API_BASE") {
            match Url::parse(&base) {
                Ok(url) => config.api_base = Some(url),
                Err(e) => warn!("Ignoring REDDIT_API_BASE={}: {}", base, e),
            }
        }

        if let Some(secs) = lookup("REDDIT_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(e) => warn!("Ignoring REDDIT_TIMEOUT_SECS={}: {}", secs, e),
            }
        }

        config
    }

    /// Create a RedditClient from this configuration
    pub fn create_client(&self) -> Result<RedditClient, RedditClientError> {
        RedditClient::from_config(self)
    }
}
