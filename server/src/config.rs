use std::env;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_RECIPES_API_URL: &str = "https://dummyjson.com/recipes";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub recipes_api_url: String,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| {
            tracing::info!("BIND_ADDR not set, using default: {}", DEFAULT_BIND_ADDR);
            DEFAULT_BIND_ADDR.to_string()
        });

        let recipes_api_url = env::var("RECIPES_API_URL").unwrap_or_else(|_| {
            tracing::info!(
                "RECIPES_API_URL not set, using default: {}",
                DEFAULT_RECIPES_API_URL
            );
            DEFAULT_RECIPES_API_URL.to_string()
        });

        let fetch_timeout_secs = env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| {
                v.parse::<u64>()
                    .map_err(|e| tracing::warn!("Invalid FETCH_TIMEOUT_SECS value: {}", e))
                    .ok()
            })
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

        Self {
            database_url,
            bind_addr,
            recipes_api_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        }
    }
}
