//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Only `API_PORT` is required; without `DATABASE_URL` or
//! `REDIS_URL` the server falls back to in-process backends.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: Option<DatabaseConfig>,
    pub redis: Option<RedisConfig>,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub feed: FeedConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Parse an `APP_ENV` value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// PostgreSQL document store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Read from the environment. `None` when `DATABASE_URL` is unset or blank.
    pub fn from_env() -> Option<Self> {
        let url = non_blank_var("DATABASE_URL")?;
        Some(Self {
            url,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(default_max_connections),
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or_else(default_min_connections),
        })
    }
}

/// Redis vote ledger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

impl RedisConfig {
    /// Read from the environment. `None` when `REDIS_URL` is unset or blank.
    pub fn from_env() -> Option<Self> {
        let url = non_blank_var("REDIS_URL")?;
        Some(Self {
            url,
            max_connections: parse_var("REDIS_MAX_CONNECTIONS")
                .unwrap_or_else(default_redis_max_connections),
        })
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Feed, search and statistics sizing
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Stories per feed page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Upper bound on stories fetched for one search
    #[serde(default = "default_search_fetch_limit")]
    pub search_fetch_limit: usize,
    /// Upper bound on documents fetched per collection for statistics
    #[serde(default = "default_stats_fetch_limit")]
    pub stats_fetch_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_fetch_limit: default_search_fetch_limit(),
            stats_fetch_limit: default_stats_fetch_limit(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "regret-archive".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_page_size() -> usize {
    6
}

fn default_search_fetch_limit() -> usize {
    200
}

fn default_stats_fetch_limit() -> usize {
    1000
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let port = match env::var("API_PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("API_PORT", raw))?,
            Err(_) => return Err(ConfigError::MissingVar("API_PORT")),
        };

        let page_size: usize = parse_var("FEED_PAGE_SIZE").unwrap_or_else(default_page_size);
        if page_size == 0 {
            return Err(ConfigError::InvalidValue("FEED_PAGE_SIZE", "0".to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            database: DatabaseConfig::from_env(),
            redis: RedisConfig::from_env(),
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var("RATE_LIMIT_REQUESTS_PER_SECOND")
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var("RATE_LIMIT_BURST").unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|s| parse_origins(&s))
                    .unwrap_or_default(),
            },
            feed: FeedConfig {
                page_size,
                search_fetch_limit: parse_var("SEARCH_FETCH_LIMIT")
                    .unwrap_or_else(default_search_fetch_limit),
                stats_fetch_limit: parse_var("STATS_FETCH_LIMIT")
                    .unwrap_or_else(default_stats_fetch_limit),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
