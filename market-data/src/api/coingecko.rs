use crate::config::Config;
use crate::error::{MarketDataError, Result};
use crate::models::{MarketChartResponse, PricePoint, TokenMarketSnapshot};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    config: Config,
}

impl CoinGeckoClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch a chronological price/volume series for one coin.
    pub async fn fetch_market_chart(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.config.coingecko_base_url,
            urlencoding::encode(coin_id),
            self.config.vs_currency,
            days
        );

        debug!("Fetching market chart from CoinGecko: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(MarketDataError::ApiError {
                status: response.status().as_u16(),
                message: format!("CoinGecko market_chart returned status: {}", response.status()),
            });
        }

        let text = response.text().await?;
        let chart: std::result::Result<MarketChartResponse, serde_json::Error> =
            serde_json::from_str(&text);
        match chart {
            Ok(chart) => {
                let points = chart.into_price_points();
                if points.is_empty() {
                    return Err(MarketDataError::InvalidData {
                        message: format!("Empty market chart for {}", coin_id),
                    });
                }
                info!("[CG] {}: {} price points over {} days", coin_id, points.len(), days);
                Ok(points)
            }
            Err(e) => {
                error!("CoinGecko market_chart raw response: {}", text);
                Err(MarketDataError::JsonError(e))
            }
        }
    }

    /// Fetch the top market snapshots by market cap, one page.
    pub async fn fetch_markets(&self) -> Result<Vec<TokenMarketSnapshot>> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1",
            self.config.coingecko_base_url, self.config.vs_currency, self.config.markets_page_size
        );

        debug!("Fetching markets from CoinGecko: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(MarketDataError::ApiError {
                status: response.status().as_u16(),
                message: format!("CoinGecko markets returned status: {}", response.status()),
            });
        }

        let text = response.text().await?;
        let markets: std::result::Result<Vec<TokenMarketSnapshot>, serde_json::Error> =
            serde_json::from_str(&text);
        match markets {
            Ok(markets) => {
                info!("[CG] markets: {} tokens", markets.len());
                Ok(markets)
            }
            Err(e) => {
                error!("CoinGecko markets raw response: {}", text);
                Err(MarketDataError::JsonError(e))
            }
        }
    }
}
