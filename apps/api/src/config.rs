use anyhow::{ensure, Context, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_APPLE_RSS_BASE_URL: &str = "https://itunes.apple.com";
/// Nebula on the US storefront.
pub const DEFAULT_APP_ID: u64 = 1447033725;
/// Apple stops serving customer-review pages after page 10.
pub const MAX_RSS_PAGES: u32 = 10;

/// Application configuration loaded from environment variables.
/// Fails at startup if a provided value cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional: without a key, insight generation returns a placeholder.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub apple_rss_base_url: String,
    pub rss_country: String,
    pub rss_max_pages: u32,
    pub rss_timeout_secs: u64,
    pub default_app_id: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let rss_max_pages = parse_env("RSS_MAX_PAGES", MAX_RSS_PAGES)?;
        ensure!(
            (1..=MAX_RSS_PAGES).contains(&rss_max_pages),
            "RSS_MAX_PAGES must be between 1 and {MAX_RSS_PAGES}"
        );

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            apple_rss_base_url: optional_env("APPLE_RSS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_APPLE_RSS_BASE_URL.to_string()),
            rss_country: optional_env("RSS_COUNTRY").unwrap_or_else(|| "us".to_string()),
            rss_max_pages,
            rss_timeout_secs: parse_env("RSS_TIMEOUT_SECS", 10)?,
            default_app_id: parse_env("DEFAULT_APP_ID", DEFAULT_APP_ID)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            apple_rss_base_url: DEFAULT_APPLE_RSS_BASE_URL.to_string(),
            rss_country: "us".to_string(),
            rss_max_pages: MAX_RSS_PAGES,
            rss_timeout_secs: 10,
            default_app_id: DEFAULT_APP_ID,
        }
    }
}

/// Returns the variable's value, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
