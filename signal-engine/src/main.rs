use anyhow::Result;
use signal_engine::config::Config;
use signal_engine::engine::AnalysisEngine;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    let market_config = market_data::config::Config::from_env()?;

    info!("Starting Coinpulse Signal Engine");
    info!("Coin: {} ({})", config.token_name, config.token_symbol);
    info!("CoinGecko: {}", market_config.coingecko_base_url);
    info!("LunarCrush: {}", market_config.lunarcrush_base_url);

    let mut engine = AnalysisEngine::new(config, market_config)?;
    engine.run().await?;

    Ok(())
}
