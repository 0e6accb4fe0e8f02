use crate::indicators::{macd, rsi, sma};
use crate::models::{MarketAssessment, Signal, TechnicalIndicator};
use tracing::debug;

const RSI_PERIOD: usize = 14;
const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const SMA_SHORT_PERIOD: usize = 20;
const SMA_LONG_PERIOD: usize = 50;
const OVERALL_THRESHOLD: f64 = 0.1;

/// Shared strength normalization: clamp the raw reading to [0, 1], then map
/// linearly into [0.2, 0.8]. Every indicator goes through this one function
/// so strengths stay comparable across indicators.
pub fn scale_strength(raw: f64) -> f64 {
    0.2 + raw.clamp(0.0, 1.0) * 0.6
}

/// Evaluate the standard indicator set (RSI 14, SMA 20, SMA 50, MACD) against
/// one price series.
pub fn generate_technical_indicators(prices: &[f64]) -> Vec<TechnicalIndicator> {
    let last_price = prices.last().copied().unwrap_or(0.0);

    let rsi_value = rsi(prices, RSI_PERIOD);
    let rsi_signal = if rsi_value > RSI_OVERBOUGHT {
        Signal::Sell
    } else if rsi_value < RSI_OVERSOLD {
        Signal::Buy
    } else {
        Signal::Neutral
    };

    let (macd_value, macd_signal_line) = macd(prices);
    let macd_signal = if macd_value > macd_signal_line {
        Signal::Buy
    } else if macd_value < macd_signal_line {
        Signal::Sell
    } else {
        Signal::Neutral
    };
    let macd_raw = (macd_value - macd_signal_line).abs() / macd_signal_line.abs().max(1.0);

    let indicators = vec![
        TechnicalIndicator {
            name: format!("RSI ({})", RSI_PERIOD),
            value: rsi_value,
            signal: rsi_signal,
            strength: scale_strength((rsi_value - 50.0).abs() / 50.0),
        },
        sma_indicator(prices, SMA_SHORT_PERIOD, last_price),
        sma_indicator(prices, SMA_LONG_PERIOD, last_price),
        TechnicalIndicator {
            name: "MACD".to_string(),
            value: macd_value,
            signal: macd_signal,
            strength: scale_strength(macd_raw),
        },
    ];

    debug!(
        "Evaluated {} indicators on {} points (last price {:.4})",
        indicators.len(),
        prices.len(),
        last_price
    );

    indicators
}

fn sma_indicator(prices: &[f64], period: usize, last_price: f64) -> TechnicalIndicator {
    let value = sma(prices, period);
    let signal = if last_price > value {
        Signal::Buy
    } else if last_price < value {
        Signal::Sell
    } else {
        Signal::Neutral
    };
    let raw = if value > 0.0 {
        (last_price - value).abs() / value
    } else {
        0.0
    };

    TechnicalIndicator {
        name: format!("SMA ({})", period),
        value,
        signal,
        strength: scale_strength(raw),
    }
}

/// Strength-weighted vote across indicators: each buy adds its strength, each
/// sell subtracts it, neutrals abstain, normalized by total strength. The
/// overall call requires the aggregate to strictly exceed +/-0.1.
pub fn overall_signal(indicators: &[TechnicalIndicator]) -> MarketAssessment {
    let total_strength: f64 = indicators.iter().map(|i| i.strength).sum();
    if total_strength == 0.0 {
        return MarketAssessment {
            aggregate: 0.0,
            overall: Signal::Neutral,
        };
    }

    let weighted: f64 = indicators
        .iter()
        .map(|i| match i.signal {
            Signal::Buy => i.strength,
            Signal::Sell => -i.strength,
            Signal::Neutral => 0.0,
        })
        .sum();
    let aggregate = weighted / total_strength;

    let overall = if aggregate > OVERALL_THRESHOLD {
        Signal::Buy
    } else if aggregate < -OVERALL_THRESHOLD {
        Signal::Sell
    } else {
        Signal::Neutral
    };

    MarketAssessment { aggregate, overall }
}
