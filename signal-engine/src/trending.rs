use crate::models::TrendingEntry;
use market_data::models::TokenMarketSnapshot;
use std::cmp::Ordering;
use tracing::debug;

const MIN_TRENDING_VOLUME: f64 = 10_000.0;
const MIN_TRENDING_MARKET_CAP: f64 = 100_000.0;
const MAX_PRICE_CHANGE_PCT: f64 = 1_000.0;
const MIN_PRICE_CHANGE_PCT: f64 = -95.0;

/// Explicit, auditable exclusion rules for the trending ranking. These are
/// data-driven lists rather than regex patterns; the matching rules stay the
/// same (wrapped-token markers, stablecoins, staking derivatives, test/demo
/// tokens, plus liquidity and data-quality floors).
#[derive(Debug, Clone)]
pub struct TrendingFilter {
    pub category_keywords: Vec<&'static str>,
    pub wrapped_symbols: Vec<&'static str>,
    pub stable_symbols: Vec<&'static str>,
    pub stable_suffixes: Vec<&'static str>,
    pub staked_symbols: Vec<&'static str>,
    pub test_markers: Vec<&'static str>,
    pub name_denylist: Vec<&'static str>,
    pub min_volume: f64,
    pub max_change_pct: f64,
    pub min_change_pct: f64,
}

impl Default for TrendingFilter {
    fn default() -> Self {
        Self {
            category_keywords: vec!["wrapped token", "liquid staking"],
            wrapped_symbols: vec![
                "wbtc", "weth", "wsol", "wbnb", "wmatic", "wavax", "wftm", "wsteth",
            ],
            stable_symbols: vec![
                "usdt", "usdc", "dai", "busd", "tusd", "frax", "usdd", "gusd", "lusd", "fdusd",
            ],
            stable_suffixes: vec!["usd"],
            staked_symbols: vec!["steth", "stsol", "stmatic", "cbeth", "reth", "meth"],
            test_markers: vec!["test", "fake", "demo", "mock"],
            name_denylist: vec![
                "wrapped bitcoin",
                "wrapped ether",
                "wrapped ethereum",
                "wrapped solana",
                "lido staked ether",
                "coinbase wrapped btc",
                "rocket pool eth",
                "tether",
                "usd coin",
                "dai",
                "binance usd",
                "first digital usd",
            ],
            min_volume: MIN_TRENDING_VOLUME,
            max_change_pct: MAX_PRICE_CHANGE_PCT,
            min_change_pct: MIN_PRICE_CHANGE_PCT,
        }
    }
}

impl TrendingFilter {
    pub fn is_excluded(&self, token: &TokenMarketSnapshot) -> bool {
        let symbol = token.symbol.to_lowercase();
        let name = token.name.to_lowercase();

        if let Some(category) = &token.category {
            let category = category.to_lowercase();
            if self.category_keywords.iter().any(|k| category.contains(k)) {
                return true;
            }
        }

        if self.wrapped_symbols.contains(&symbol.as_str())
            || name.contains("wrapped")
            || name.contains("liquid staking")
            || name.contains("staked")
        {
            return true;
        }

        if self.stable_symbols.contains(&symbol.as_str())
            || self.stable_suffixes.iter().any(|s| symbol.ends_with(s))
            || name.contains("stablecoin")
        {
            return true;
        }

        if self.staked_symbols.contains(&symbol.as_str()) {
            return true;
        }

        if self
            .test_markers
            .iter()
            .any(|m| symbol.contains(m) || name.contains(m))
        {
            return true;
        }

        if self.name_denylist.contains(&name.as_str()) {
            return true;
        }

        // liquidity floor and anti-manipulation guards
        if token.volume_24h < self.min_volume {
            return true;
        }
        if token.price_change_pct_24h > self.max_change_pct
            || token.price_change_pct_24h < self.min_change_pct
        {
            return true;
        }

        false
    }

    /// Filter, score, drop zero scores, and sort descending by score.
    pub fn rank(&self, tokens: &[TokenMarketSnapshot]) -> Vec<TrendingEntry> {
        let mut entries: Vec<TrendingEntry> = tokens
            .iter()
            .filter(|t| !self.is_excluded(t))
            .map(|t| TrendingEntry {
                snapshot: t.clone(),
                score: trending_score(t),
            })
            .filter(|e| e.score > 0.0)
            .collect();

        entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!("Ranked {} trending tokens out of {}", entries.len(), tokens.len());
        entries
    }
}

/// Heuristic trending score: log-scaled volume and absolute 24h price change
/// weighted evenly, plus a small turnover bonus. Tokens below the volume or
/// market-cap floor score exactly 0.
pub fn trending_score(token: &TokenMarketSnapshot) -> f64 {
    if token.volume_24h < MIN_TRENDING_VOLUME || token.market_cap < MIN_TRENDING_MARKET_CAP {
        return 0.0;
    }

    let volume_score = (token.volume_24h.log10() * 10.0).min(100.0);
    let price_change_score = (token.price_change_pct_24h.abs() * 2.0).min(100.0);
    let turnover_bonus = (token.volume_24h / token.market_cap * 100.0).min(10.0);

    0.5 * volume_score + 0.5 * price_change_score + turnover_bonus
}

/// Rank with the default exclusion rules.
pub fn trending_tokens(tokens: &[TokenMarketSnapshot]) -> Vec<TrendingEntry> {
    TrendingFilter::default().rank(tokens)
}
