use crate::error::{MarketDataError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub coingecko_base_url: String,
    pub lunarcrush_base_url: String,
    pub vs_currency: String,
    pub markets_page_size: u32,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let markets_page_size = env::var("MARKETS_PAGE_SIZE")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u32>()
            .map_err(|_| MarketDataError::ConfigError("Invalid MARKETS_PAGE_SIZE".to_string()))?;

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| MarketDataError::ConfigError("Invalid REQUEST_TIMEOUT_SECS".to_string()))?;

        Ok(Self {
            coingecko_base_url: env::var("COINGECKO_BASE_URL")
                .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string()),
            lunarcrush_base_url: env::var("LUNARCRUSH_BASE_URL")
                .unwrap_or_else(|_| "https://lunarcrush.com/api4/public".to_string()),
            vs_currency: env::var("VS_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            markets_page_size,
            request_timeout_secs,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coingecko_base_url: "https://api.coingecko.com/api/v3".to_string(),
            lunarcrush_base_url: "https://lunarcrush.com/api4/public".to_string(),
            vs_currency: "usd".to_string(),
            markets_page_size: 100,
            request_timeout_secs: 10,
        }
    }
}
