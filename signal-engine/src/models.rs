use market_data::models::{SentimentSource, TokenMarketSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

/// One evaluated indicator: its latest value, its classification, and a
/// confidence-like strength always inside [0.2, 0.8].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TechnicalIndicator {
    pub name: String,
    pub value: f64,
    pub signal: Signal,
    pub strength: f64,
}

/// Strength-weighted aggregate of a set of indicators.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketAssessment {
    /// In [-1, 1]: positive leans buy, negative leans sell.
    pub aggregate: f64,
    pub overall: Signal,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingEntry {
    pub snapshot: TokenMarketSnapshot,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentSummary {
    pub score: f64,
    pub label: SentimentLabel,
    pub sources: Vec<SentimentSource>,
}
