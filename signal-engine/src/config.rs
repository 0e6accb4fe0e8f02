use anyhow::{anyhow, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub coin_id: String,
    pub token_symbol: String,
    pub token_name: String,
    pub check_interval_secs: u64,
    pub chart_days: u32,
    pub fallback_points: usize,
    pub trending_top_n: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            coin_id: env::var("COIN_ID").unwrap_or_else(|_| "bitcoin".to_string()),
            token_symbol: env::var("TOKEN_SYMBOL").unwrap_or_else(|_| "BTC".to_string()),
            token_name: env::var("TOKEN_NAME").unwrap_or_else(|_| "Bitcoin".to_string()),
            check_interval_secs: env::var("CHECK_INTERVAL_SECS")
                .unwrap_or_else(|_| "300".to_string()) // 5 minutes
                .parse()
                .map_err(|_| anyhow!("Invalid CHECK_INTERVAL_SECS"))?,
            chart_days: env::var("CHART_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow!("Invalid CHART_DAYS"))?,
            fallback_points: env::var("FALLBACK_POINTS")
                .unwrap_or_else(|_| "168".to_string()) // one week of hourly points
                .parse()
                .map_err(|_| anyhow!("Invalid FALLBACK_POINTS"))?,
            trending_top_n: env::var("TRENDING_TOP_N")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow!("Invalid TRENDING_TOP_N"))?,
        })
    }
}
