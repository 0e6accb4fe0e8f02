use crate::config::Config;
use crate::error::{MarketDataError, Result};
use crate::models::{SentimentSnapshot, SentimentSource};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct LunarCrushResponse {
    data: LunarCrushCoin,
}

#[derive(Debug, Deserialize)]
struct LunarCrushCoin {
    #[serde(default)]
    sentiment: f64,
    /// Per-network sentiment, e.g. "tweet" -> 62.0.
    #[serde(default)]
    types_sentiment: HashMap<String, f64>,
    /// Per-network post counts, matched by key with `types_sentiment`.
    #[serde(default)]
    types_interactions: HashMap<String, u64>,
}

#[derive(Clone)]
pub struct LunarCrushClient {
    client: Client,
    config: Config,
}

impl LunarCrushClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch social sentiment for one token, broken out per network where
    /// the API provides it, otherwise as a single aggregate source.
    pub async fn fetch_sentiment(&self, symbol: &str) -> Result<SentimentSnapshot> {
        let url = format!(
            "{}/coins/{}/v1",
            self.config.lunarcrush_base_url,
            urlencoding::encode(symbol)
        );

        debug!("Fetching sentiment from LunarCrush: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(MarketDataError::ApiError {
                status: response.status().as_u16(),
                message: format!("LunarCrush returned status: {}", response.status()),
            });
        }

        let text = response.text().await?;
        let parsed: std::result::Result<LunarCrushResponse, serde_json::Error> =
            serde_json::from_str(&text);
        match parsed {
            Ok(parsed) => {
                let sources = Self::build_sources(&parsed.data);
                if sources.is_empty() {
                    return Err(MarketDataError::InvalidData {
                        message: format!("No sentiment sources for {}", symbol),
                    });
                }
                info!("[LC] {}: {} sentiment sources", symbol, sources.len());
                Ok(SentimentSnapshot {
                    id: Uuid::new_v4().to_string(),
                    symbol: symbol.to_string(),
                    sources,
                    fetched_at: Utc::now(),
                    live: true,
                })
            }
            Err(e) => {
                error!("LunarCrush raw response: {}", text);
                Err(MarketDataError::JsonError(e))
            }
        }
    }

    fn build_sources(coin: &LunarCrushCoin) -> Vec<SentimentSource> {
        if coin.types_sentiment.is_empty() {
            if coin.sentiment <= 0.0 {
                return Vec::new();
            }
            return vec![SentimentSource {
                name: "LunarCrush".to_string(),
                sentiment: coin.sentiment.clamp(0.0, 100.0),
                mentions: coin.types_interactions.values().sum(),
            }];
        }

        let mut sources: Vec<SentimentSource> = coin
            .types_sentiment
            .iter()
            .map(|(network, sentiment)| SentimentSource {
                name: network.clone(),
                sentiment: sentiment.clamp(0.0, 100.0),
                mentions: coin.types_interactions.get(network).copied().unwrap_or(0),
            })
            .collect();
        // HashMap iteration order is unstable; keep output stable for logs and tests
        sources.sort_by(|a, b| a.name.cmp(&b.name));
        sources
    }
}
