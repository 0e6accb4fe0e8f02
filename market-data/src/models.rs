use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation of a token price, timestamps in epoch milliseconds.
/// Series are chronological ascending; duplicate timestamps are tolerated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
    pub volume: Option<f64>,
}

/// Per-token market summary, shaped after a CoinGecko `/coins/markets` row.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenMarketSnapshot {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "current_price")]
    pub price: f64,
    #[serde(rename = "total_volume")]
    pub volume_24h: f64,
    pub market_cap: f64,
    #[serde(rename = "price_change_percentage_24h")]
    pub price_change_pct_24h: f64,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SentimentSource {
    pub name: String,
    /// Sentiment in [0, 100], 50 neutral.
    pub sentiment: f64,
    pub mentions: u64,
}

/// A fetched (or generated) batch of sentiment sources for one token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentimentSnapshot {
    pub id: String,
    pub symbol: String,
    pub sources: Vec<SentimentSource>,
    pub fetched_at: DateTime<Utc>,
    /// False when the batch was generated locally after an upstream failure.
    pub live: bool,
}

/// Raw CoinGecko `market_chart` payload: parallel [timestamp_ms, value] rows.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<[f64; 2]>,
    #[serde(default)]
    pub total_volumes: Vec<[f64; 2]>,
}

impl MarketChartResponse {
    /// Zip the price and volume rows into a single chronological series.
    /// Volume rows are matched positionally; a missing tail leaves `volume` unset.
    pub fn into_price_points(self) -> Vec<PricePoint> {
        let volumes = self.total_volumes;
        self.prices
            .into_iter()
            .enumerate()
            .map(|(i, row)| PricePoint {
                timestamp: row[0] as i64,
                price: row[1],
                volume: volumes.get(i).map(|v| v[1]),
            })
            .collect()
    }
}
