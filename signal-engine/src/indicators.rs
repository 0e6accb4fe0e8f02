//! Pure indicator math over chronological price series.
//!
//! All functions are synchronous and reentrant, take prices oldest-first, and
//! return plain sentinels (50 for RSI, 0.0 elsewhere) instead of erroring on
//! series too short to evaluate.

/// Arithmetic mean of the last `period` prices, or of the whole series when
/// it is shorter than `period`. Empty input returns 0.0.
pub fn sma(prices: &[f64], period: usize) -> f64 {
    let n = prices.len().min(period);
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = prices.iter().rev().take(n).sum();
    sum / n as f64
}

/// Full-length EMA series seeded with the first price, multiplier 2/(period+1).
pub fn ema_list(prices: &[f64], period: usize) -> Vec<f64> {
    if prices.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len());
    let mut ema = prices[0];
    out.push(ema);
    for price in &prices[1..] {
        ema = price * k + ema * (1.0 - k);
        out.push(ema);
    }
    out
}

/// Single-window RSI over the first `period` transitions of the series.
///
/// Deliberately non-rolling (no Wilder smoothing): the window behavior
/// matches the rest of the analytics pipeline, not the textbook oscillator.
/// Fewer than `period + 1` points returns the neutral 50.0; a window with no
/// losses returns 100.0.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if prices.len() < period + 1 {
        return 50.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let change = prices[i] - prices[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses += change.abs();
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// MACD line (EMA12 - EMA26) and its EMA9 signal line, latest values of each.
/// Empty input returns (0.0, 0.0).
pub fn macd(prices: &[f64]) -> (f64, f64) {
    if prices.is_empty() {
        return (0.0, 0.0);
    }

    let ema12 = ema_list(prices, 12);
    let ema26 = ema_list(prices, 26);
    let line: Vec<f64> = ema12
        .iter()
        .zip(ema26.iter())
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = ema_list(&line, 9);

    (line[line.len() - 1], signal[signal.len() - 1])
}

/// Population standard deviation of simple period-over-period returns.
/// Fewer than two points returns 0.0.
pub fn volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;

    variance.sqrt()
}

/// Raw min/max over the last `min(20, len)` points. No smoothing, no outlier
/// rejection. Empty input returns (0.0, 0.0).
pub fn support_resistance(prices: &[f64]) -> (f64, f64) {
    if prices.is_empty() {
        return (0.0, 0.0);
    }

    let window = &prices[prices.len() - prices.len().min(20)..];
    let support = window.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let resistance = window.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    (support, resistance)
}

/// Least-squares slope over the series, normalized by the mean price and
/// capped at 1.0. Fewer than 20 points returns 0.0.
pub fn trend_strength(prices: &[f64]) -> f64 {
    if prices.len() < 20 {
        return 0.0;
    }

    let n = prices.len() as f64;
    let sum_x: f64 = (0..prices.len()).map(|i| i as f64).sum();
    let sum_y: f64 = prices.iter().sum();
    let sum_xy: f64 = prices.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..prices.len()).map(|i| (i as f64) * (i as f64)).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let mean_price = sum_y / n;

    (slope / mean_price).abs().min(1.0)
}

/// Five-point rate of change. Fewer than five points returns 0.0.
pub fn momentum(prices: &[f64]) -> f64 {
    if prices.len() < 5 {
        return 0.0;
    }

    let recent = prices[prices.len() - 1];
    let older = prices[prices.len() - 5];
    (recent - older) / older
}
