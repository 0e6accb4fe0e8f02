use crate::config::Config;
use crate::indicators::{momentum, support_resistance, trend_strength, volatility};
use crate::models::{MarketAssessment, SentimentSummary, TechnicalIndicator, TrendingEntry};
use crate::sentiment::aggregate_sentiment;
use crate::signal::{generate_technical_indicators, overall_signal};
use crate::trending::trending_tokens;
use anyhow::Result;
use chrono::{DateTime, Utc};
use market_data::api::{CoinGeckoClient, LunarCrushClient};
use market_data::config::Config as MarketDataConfig;
use market_data::fallback::{markets_or_empty, price_history_or_fallback, sentiment_or_fallback};
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info};

pub struct AnalysisEngine {
    config: Config,
    coingecko: CoinGeckoClient,
    lunarcrush: LunarCrushClient,
}

/// Everything one cycle produced, for logging and tests.
#[derive(Debug)]
pub struct CycleReport {
    pub completed_at: DateTime<Utc>,
    pub indicators: Vec<TechnicalIndicator>,
    pub assessment: MarketAssessment,
    pub trending: Vec<TrendingEntry>,
    pub sentiment: SentimentSummary,
}

impl AnalysisEngine {
    pub fn new(config: Config, market_config: MarketDataConfig) -> Result<Self> {
        let coingecko = CoinGeckoClient::new(market_config.clone())?;
        let lunarcrush = LunarCrushClient::new(market_config)?;

        Ok(Self {
            config,
            coingecko,
            lunarcrush,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("🚀 Starting Signal Engine...");
        info!("═══════════════════════════════════════════════════════════════");
        info!("  🪙 Coin: {} ({})", self.config.token_name, self.config.token_symbol);
        info!("  📈 Chart Window: {} days", self.config.chart_days);
        info!("  ⏱️  Check Interval: {} seconds", self.config.check_interval_secs);
        info!("  🔥 Trending Top N: {}", self.config.trending_top_n);
        info!("═══════════════════════════════════════════════════════════════");

        let mut ticker = time::interval(Duration::from_secs(self.config.check_interval_secs));

        loop {
            ticker.tick().await;

            match self.analysis_cycle().await {
                Ok(report) => {
                    debug!(
                        "✅ Analysis cycle completed: {} indicators, {} trending tokens",
                        report.indicators.len(),
                        report.trending.len()
                    );
                }
                Err(e) => {
                    error!("❌ Analysis cycle failed: {}", e);
                }
            }
        }
    }

    pub async fn analysis_cycle(&self) -> Result<CycleReport> {
        // Step 1: price history (synthetic walk when the fetch fails)
        let points = price_history_or_fallback(
            &self.coingecko,
            &self.config.coin_id,
            &self.config.token_symbol,
            self.config.chart_days,
            self.config.fallback_points,
        )
        .await;
        let closes: Vec<f64> = points.iter().map(|p| p.price).collect();

        // Step 2: indicators and the overall call
        let indicators = generate_technical_indicators(&closes);
        let assessment = overall_signal(&indicators);

        for indicator in &indicators {
            info!(
                "📊 {}: {:.4} -> {:?} (strength {:.2})",
                indicator.name, indicator.value, indicator.signal, indicator.strength
            );
        }

        let (support, resistance) = support_resistance(&closes);
        info!(
            "🎯 Overall: {:?} (aggregate {:+.3}) | S/R ${:.2} / ${:.2} | volatility {:.3}% | trend {:.2} | momentum {:+.3}%",
            assessment.overall,
            assessment.aggregate,
            support,
            resistance,
            volatility(&closes) * 100.0,
            trend_strength(&closes),
            momentum(&closes) * 100.0
        );

        // Step 3: trending ranking over the market page
        let markets = markets_or_empty(&self.coingecko).await;
        let trending = trending_tokens(&markets);
        for entry in trending.iter().take(self.config.trending_top_n) {
            info!(
                "🔥 {} ({}): score {:.1}, 24h {:+.2}%",
                entry.snapshot.name,
                entry.snapshot.symbol.to_uppercase(),
                entry.score,
                entry.snapshot.price_change_pct_24h
            );
        }

        // Step 4: social sentiment (deterministic fallback when offline)
        let snapshot = sentiment_or_fallback(
            &self.lunarcrush,
            &self.config.token_symbol,
            &self.config.token_name,
        )
        .await;
        let live = snapshot.live;
        let sentiment = aggregate_sentiment(snapshot.sources);
        info!(
            "💬 Sentiment: {:.1} ({:?}) from {} sources{}",
            sentiment.score,
            sentiment.label,
            sentiment.sources.len(),
            if live { "" } else { " [fallback]" }
        );

        debug!("Cycle summary: {}", serde_json::to_string(&indicators)?);

        Ok(CycleReport {
            completed_at: Utc::now(),
            indicators,
            assessment,
            trending,
            sentiment,
        })
    }
}
