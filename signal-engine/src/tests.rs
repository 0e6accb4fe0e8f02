use crate::engine::AnalysisEngine;
use crate::indicators::{
    ema_list, macd, momentum, rsi, sma, support_resistance, trend_strength, volatility,
};
use crate::models::{Signal, SentimentLabel, TechnicalIndicator};
use crate::sentiment::aggregate_sentiment;
use crate::signal::{generate_technical_indicators, overall_signal, scale_strength};
use crate::trending::{trending_score, trending_tokens, TrendingFilter};
use market_data::api::CoinGeckoClient;
use market_data::fallback::{price_history_or_fallback, synthetic_price_series};
use market_data::models::{SentimentSource, TokenMarketSnapshot};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {} but got {}",
        expected,
        actual
    );
}

fn token(symbol: &str, name: &str, volume: f64, market_cap: f64, change: f64) -> TokenMarketSnapshot {
    TokenMarketSnapshot {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price: 1.0,
        volume_24h: volume,
        market_cap,
        price_change_pct_24h: change,
        category: None,
    }
}

#[test]
fn sma_of_last_period_elements() {
    assert_close(sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3), 4.0);
}

#[test]
fn sma_averages_whatever_is_available() {
    assert_close(sma(&[1.0, 2.0], 5), 1.5);
    assert_close(sma(&[7.0], 20), 7.0);
    assert_close(sma(&[], 20), 0.0);
}

#[test]
fn ema_seed_is_first_price() {
    let ema = ema_list(&[10.0, 20.0, 30.0], 2);
    assert_eq!(ema.len(), 3);
    assert_close(ema[0], 10.0);
    // k = 2/3: 20*2/3 + 10/3, then 30*2/3 + prev/3
    assert_close(ema[1], 50.0 / 3.0);
    assert_close(ema[2], 20.0 + 50.0 / 9.0);
}

#[test]
fn ema_tracks_a_rising_series() {
    let prices: Vec<f64> = (1..=30).map(|i| i as f64).collect();
    let ema = ema_list(&prices, 12);
    assert_eq!(ema.len(), prices.len());
    assert!(ema[ema.len() - 1] > ema[0]);
    // EMA lags a monotone rise
    assert!(ema[ema.len() - 1] < prices[prices.len() - 1]);
}

#[test]
fn rsi_short_input_returns_neutral_fifty() {
    assert_close(rsi(&[], 14), 50.0);
    let nine: Vec<f64> = (1..=9).map(|i| i as f64).collect();
    assert_close(rsi(&nine, 14), 50.0);
    let fourteen: Vec<f64> = (1..=14).map(|i| i as f64).collect();
    assert_close(rsi(&fourteen, 14), 50.0);
}

#[test]
fn rsi_all_gains_is_one_hundred() {
    let prices: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    assert_close(rsi(&prices, 14), 100.0);
}

#[test]
fn rsi_mixed_window() {
    // transitions +1, -1, +1: gains 2, losses 1, RS = 2
    let prices = [1.0, 2.0, 1.0, 2.0, 3.0];
    assert_close(rsi(&prices, 3), 100.0 - 100.0 / 3.0);
}

#[test]
fn macd_positive_on_a_rising_series() {
    let prices: Vec<f64> = (1..=60).map(|i| i as f64).collect();
    let (line, signal) = macd(&prices);
    assert!(line > 0.0);
    assert!(line > signal);
}

#[test]
fn macd_empty_input_is_zero() {
    assert_eq!(macd(&[]), (0.0, 0.0));
}

#[test]
fn volatility_sentinels_and_flat_series() {
    assert_close(volatility(&[]), 0.0);
    assert_close(volatility(&[42.0]), 0.0);
    assert_close(volatility(&[5.0, 5.0, 5.0, 5.0]), 0.0);
}

#[test]
fn support_resistance_uses_last_twenty_points() {
    // the early spike at 500 falls outside the 20-point window
    let mut prices = vec![500.0];
    prices.extend((1..=20).map(|i| 100.0 + i as f64));
    let (support, resistance) = support_resistance(&prices);
    assert_close(support, 101.0);
    assert_close(resistance, 120.0);
}

#[test]
fn scale_strength_bounds_and_endpoints() {
    assert_close(scale_strength(0.0), 0.2);
    assert_close(scale_strength(1.0), 0.8);
    assert_close(scale_strength(0.5), 0.5);
    assert_close(scale_strength(-3.0), 0.2);
    assert_close(scale_strength(42.0), 0.8);
}

#[test]
fn scale_strength_is_monotonic() {
    let mut previous = f64::NEG_INFINITY;
    for i in 0..=40 {
        let scaled = scale_strength(-1.0 + i as f64 * 0.1);
        assert!(scaled >= previous);
        previous = scaled;
    }
}

#[test]
fn indicator_set_shape() {
    let prices: Vec<f64> = (1..=60).map(|i| 100.0 + (i as f64).sin() * 5.0).collect();
    let indicators = generate_technical_indicators(&prices);
    assert_eq!(indicators.len(), 4);
    let names: Vec<&str> = indicators.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["RSI (14)", "SMA (20)", "SMA (50)", "MACD"]);
    for indicator in &indicators {
        assert!(indicator.strength >= 0.2 && indicator.strength <= 0.8);
    }
}

#[test]
fn unanimous_buy_aggregates_to_one() {
    let indicators: Vec<TechnicalIndicator> = (0..4)
        .map(|i| TechnicalIndicator {
            name: format!("ind-{}", i),
            value: 0.0,
            signal: Signal::Buy,
            strength: 0.5,
        })
        .collect();
    let assessment = overall_signal(&indicators);
    assert_close(assessment.aggregate, 1.0);
    assert_eq!(assessment.overall, Signal::Buy);
}

#[test]
fn opposing_signals_cancel_to_neutral() {
    let indicators = vec![
        TechnicalIndicator {
            name: "a".to_string(),
            value: 0.0,
            signal: Signal::Buy,
            strength: 0.5,
        },
        TechnicalIndicator {
            name: "b".to_string(),
            value: 0.0,
            signal: Signal::Sell,
            strength: 0.5,
        },
    ];
    let assessment = overall_signal(&indicators);
    assert_close(assessment.aggregate, 0.0);
    assert_eq!(assessment.overall, Signal::Neutral);
}

#[test]
fn overall_signal_threshold_is_strict() {
    // buy strength 0.1 against neutral strength 0.9 lands the aggregate
    // exactly on the 0.1 boundary, which must not flip to Buy
    let indicators = vec![
        TechnicalIndicator {
            name: "buy".to_string(),
            value: 0.0,
            signal: Signal::Buy,
            strength: 0.1,
        },
        TechnicalIndicator {
            name: "flat".to_string(),
            value: 0.0,
            signal: Signal::Neutral,
            strength: 0.9,
        },
    ];
    let assessment = overall_signal(&indicators);
    assert_close(assessment.aggregate, 0.1);
    assert_eq!(assessment.overall, Signal::Neutral);
}

#[test]
fn overall_signal_empty_set_is_neutral() {
    let assessment = overall_signal(&[]);
    assert_close(assessment.aggregate, 0.0);
    assert_eq!(assessment.overall, Signal::Neutral);
}

#[test]
fn trending_score_zero_below_floors() {
    assert_close(trending_score(&token("abc", "Abc", 9_999.0, 1e9, 500.0)), 0.0);
    assert_close(trending_score(&token("abc", "Abc", 1e6, 99_999.0, 500.0)), 0.0);
}

#[test]
fn trending_score_known_value() {
    // volume 1e6 -> log10 = 6 -> 60; |change| 10 -> 20; turnover 10% -> bonus 10
    let t = token("abc", "Abc", 1_000_000.0, 10_000_000.0, 10.0);
    assert_close(trending_score(&t), 0.5 * 60.0 + 0.5 * 20.0 + 10.0);
}

#[test]
fn filter_excludes_wrapped_and_keeps_native() {
    let filter = TrendingFilter::default();
    assert!(filter.is_excluded(&token("wBTC", "Wrapped Bitcoin", 1e6, 1e9, 3.0)));
    assert!(!filter.is_excluded(&token("BTC", "Bitcoin", 1_000_000.0, 1e9, 3.0)));
}

#[test]
fn filter_excludes_stables_staking_and_test_tokens() {
    let filter = TrendingFilter::default();
    assert!(filter.is_excluded(&token("USDT", "Tether", 1e9, 1e10, 0.01)));
    assert!(filter.is_excluded(&token("xusd", "Some Dollar", 1e6, 1e8, 0.2)));
    assert!(filter.is_excluded(&token("stETH", "Lido Staked Ether", 1e8, 1e10, 2.0)));
    assert!(filter.is_excluded(&token("TST", "Test Token", 1e6, 1e8, 5.0)));
}

#[test]
fn filter_excludes_by_category_and_data_quality() {
    let filter = TrendingFilter::default();
    let mut wrapped = token("xyz", "Xyz Protocol", 1e6, 1e8, 5.0);
    wrapped.category = Some("Wrapped Token".to_string());
    assert!(filter.is_excluded(&wrapped));

    // thin liquidity
    assert!(filter.is_excluded(&token("xyz", "Xyz Protocol", 5_000.0, 1e8, 5.0)));
    // implausible pump / collapse
    assert!(filter.is_excluded(&token("xyz", "Xyz Protocol", 1e6, 1e8, 1_500.0)));
    assert!(filter.is_excluded(&token("xyz", "Xyz Protocol", 1e6, 1e8, -99.0)));
    // a legitimate small cap stays in
    assert!(!filter.is_excluded(&token("xyz", "Xyz Protocol", 50_000.0, 500_000.0, 12.0)));
}

#[test]
fn trending_rank_sorts_descending_and_drops_zero_scores() {
    let tokens = vec![
        token("aaa", "Alpha", 100_000.0, 1e7, 2.0),
        token("bbb", "Beta", 50_000_000.0, 1e9, 25.0),
        token("ccc", "Gamma", 5_000.0, 1e7, 90.0), // below volume floor
        token("usdt", "Tether", 1e9, 1e10, 0.01),  // stable, excluded
    ];
    let ranked = trending_tokens(&tokens);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].snapshot.symbol, "bbb");
    assert_eq!(ranked[1].snapshot.symbol, "aaa");
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn sentiment_aggregation_weighted_by_mentions() {
    let sources = vec![
        SentimentSource {
            name: "Twitter/X".to_string(),
            sentiment: 80.0,
            mentions: 300,
        },
        SentimentSource {
            name: "Reddit".to_string(),
            sentiment: 40.0,
            mentions: 100,
        },
    ];
    let summary = aggregate_sentiment(sources);
    assert_close(summary.score, 70.0);
    assert_eq!(summary.label, SentimentLabel::Bullish);
}

#[test]
fn sentiment_labels_and_empty_input() {
    let bearish = aggregate_sentiment(vec![SentimentSource {
        name: "News Media".to_string(),
        sentiment: 20.0,
        mentions: 10,
    }]);
    assert_eq!(bearish.label, SentimentLabel::Bearish);

    let neutral = aggregate_sentiment(Vec::new());
    assert_close(neutral.score, 50.0);
    assert_eq!(neutral.label, SentimentLabel::Neutral);

    // zero mentions falls back to the plain mean
    let unweighted = aggregate_sentiment(vec![
        SentimentSource {
            name: "a".to_string(),
            sentiment: 70.0,
            mentions: 0,
        },
        SentimentSource {
            name: "b".to_string(),
            sentiment: 50.0,
            mentions: 0,
        },
    ]);
    assert_close(unweighted.score, 60.0);
    assert_eq!(unweighted.label, SentimentLabel::Bullish);
}

#[test]
fn end_to_end_ten_point_series() {
    let prices = [100.0, 102.0, 101.0, 105.0, 110.0, 108.0, 115.0, 120.0, 118.0, 125.0];

    assert!(volatility(&prices) > 0.0);
    assert_close(rsi(&prices, 14), 50.0);

    let (support, resistance) = support_resistance(&prices);
    assert_close(support, 100.0);
    assert_close(resistance, 125.0);
}

#[test]
fn full_pipeline_over_a_synthetic_series() {
    let points = synthetic_price_series("SOL", 168);
    let closes: Vec<f64> = points.iter().map(|p| p.price).collect();

    let indicators = generate_technical_indicators(&closes);
    let assessment = overall_signal(&indicators);

    assert_eq!(indicators.len(), 4);
    assert!(assessment.aggregate >= -1.0 && assessment.aggregate <= 1.0);
    assert!(trend_strength(&closes) >= 0.0 && trend_strength(&closes) <= 1.0);
    assert!(momentum(&closes).is_finite());
}

#[tokio::test]
async fn engine_cycle_completes_on_fallback_data() {
    let config = crate::config::Config {
        coin_id: "bitcoin".to_string(),
        token_symbol: "BTC".to_string(),
        token_name: "Bitcoin".to_string(),
        check_interval_secs: 300,
        chart_days: 30,
        fallback_points: 96,
        trending_top_n: 10,
    };
    // both upstreams unroutable: the whole cycle has to run on generated data
    let market_config = market_data::config::Config {
        coingecko_base_url: "http://127.0.0.1:9".to_string(),
        lunarcrush_base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 1,
        ..market_data::config::Config::default()
    };
    let engine = AnalysisEngine::new(config, market_config).expect("engine should build");

    let report = engine
        .analysis_cycle()
        .await
        .expect("cycle should degrade, not fail");

    assert_eq!(report.indicators.len(), 4);
    for indicator in &report.indicators {
        assert!(indicator.strength >= 0.2 && indicator.strength <= 0.8);
    }
    assert!(report.assessment.aggregate >= -1.0 && report.assessment.aggregate <= 1.0);
    // a failed markets fetch degrades to an empty page, so nothing trends
    assert!(report.trending.is_empty());
    assert_eq!(report.sentiment.sources.len(), 4);
    assert!(report.completed_at <= chrono::Utc::now());
}

#[tokio::test]
async fn price_history_degrades_to_synthetic_series() {
    // unroutable endpoint forces the fallback path
    let config = market_data::config::Config {
        coingecko_base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 1,
        ..market_data::config::Config::default()
    };
    let client = CoinGeckoClient::new(config).expect("client should build");

    let points = price_history_or_fallback(&client, "bitcoin", "BTC", 30, 72).await;
    assert_eq!(points.len(), 72);
    assert!(points.iter().all(|p| p.price > 0.0));
}
