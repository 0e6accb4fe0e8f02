//! Locally generated stand-in data for failed upstream fetches.
//!
//! The degradation policy is a single catch-and-fallback: no retries, no
//! backoff. Fallback sentiment must be reproducible (same token name gives
//! the same sources on every call), so everything here is seeded from an
//! FNV-1a hash instead of a real RNG.

use crate::api::{CoinGeckoClient, LunarCrushClient};
use crate::models::{PricePoint, SentimentSnapshot, SentimentSource, TokenMarketSnapshot};
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const FALLBACK_SOURCE_NAMES: [&str; 4] = ["Twitter/X", "Reddit", "News Media", "Crypto Forums"];

const SERIES_INTERVAL_MS: i64 = 3_600_000;

/// FNV-1a 64-bit hash over the raw bytes of `input`.
pub fn fnv1a(input: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in input.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn xorshift64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

/// Next value in [0, 1) from the xorshift stream.
fn next_unit(state: &mut u64) -> f64 {
    (xorshift64(state) >> 11) as f64 / (1u64 << 53) as f64
}

/// Deterministic pseudo-sentiment for one token name.
///
/// Base score lands in [30, 70]; each named source perturbs it by a
/// hash-derived offset in [-10, 10], clamped to [0, 100]. The snapshot id and
/// timestamp vary per call, the `sources` vector does not.
pub fn fallback_sentiment(symbol: &str, name: &str) -> SentimentSnapshot {
    let hash = fnv1a(name);
    let base = 30.0 + (hash % 41) as f64;

    let sources = FALLBACK_SOURCE_NAMES
        .iter()
        .enumerate()
        .map(|(i, source_name)| {
            let slice = hash.rotate_right(8 * (i as u32 + 1));
            let offset = (slice % 21) as f64 - 10.0;
            SentimentSource {
                name: source_name.to_string(),
                sentiment: (base + offset).clamp(0.0, 100.0),
                mentions: 100 + slice % 9_900,
            }
        })
        .collect();

    SentimentSnapshot {
        id: Uuid::new_v4().to_string(),
        symbol: symbol.to_string(),
        sources,
        fetched_at: Utc::now(),
        live: false,
    }
}

/// Synthetic hourly price walk seeded from the token symbol.
///
/// Prices and volumes reproduce exactly for the same symbol and length;
/// only the timestamps are anchored to the current hour.
pub fn synthetic_price_series(symbol: &str, points: usize) -> Vec<PricePoint> {
    if points == 0 {
        return Vec::new();
    }

    let hash = fnv1a(symbol);
    let mut state = hash | 1;
    let base_price = 0.5 + (hash % 10_000) as f64 / 100.0;
    let base_volume = 50_000.0 + (hash % 1_000_000) as f64;

    let end = Utc::now().timestamp_millis();
    let start = end - (points as i64 - 1) * SERIES_INTERVAL_MS;

    let mut price = base_price;
    (0..points)
        .map(|i| {
            // +/- 2% step per hour, never below a cent
            let step = (next_unit(&mut state) - 0.5) * 0.04;
            price = (price * (1.0 + step)).max(0.01);
            PricePoint {
                timestamp: start + i as i64 * SERIES_INTERVAL_MS,
                price,
                volume: Some(base_volume * (0.5 + next_unit(&mut state))),
            }
        })
        .collect()
}

/// Fetch a price series, degrading to a synthetic walk on any upstream error.
pub async fn price_history_or_fallback(
    client: &CoinGeckoClient,
    coin_id: &str,
    symbol: &str,
    days: u32,
    fallback_points: usize,
) -> Vec<PricePoint> {
    match client.fetch_market_chart(coin_id, days).await {
        Ok(points) => points,
        Err(e) => {
            warn!("⚠️  Price history fetch failed for {}: {} - using synthetic series", coin_id, e);
            synthetic_price_series(symbol, fallback_points)
        }
    }
}

/// Fetch market snapshots, degrading to an empty list on upstream error.
pub async fn markets_or_empty(client: &CoinGeckoClient) -> Vec<TokenMarketSnapshot> {
    match client.fetch_markets().await {
        Ok(markets) => markets,
        Err(e) => {
            warn!("⚠️  Markets fetch failed: {} - trending will be skipped this cycle", e);
            Vec::new()
        }
    }
}

/// Fetch live sentiment, degrading to the deterministic generator.
pub async fn sentiment_or_fallback(
    client: &LunarCrushClient,
    symbol: &str,
    name: &str,
) -> SentimentSnapshot {
    match client.fetch_sentiment(symbol).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("⚠️  Sentiment fetch failed for {}: {} - using deterministic fallback", symbol, e);
            fallback_sentiment(symbol, name)
        }
    }
}
