use crate::models::{SentimentLabel, SentimentSummary};
use market_data::models::SentimentSource;

const BULLISH_THRESHOLD: f64 = 60.0;
const BEARISH_THRESHOLD: f64 = 40.0;

/// Collapse per-source sentiments into one score/label pair. Sources are
/// weighted by mention count; when no source reports mentions the plain mean
/// is used. No sources at all reads as a neutral 50.
pub fn aggregate_sentiment(sources: Vec<SentimentSource>) -> SentimentSummary {
    if sources.is_empty() {
        return SentimentSummary {
            score: 50.0,
            label: SentimentLabel::Neutral,
            sources,
        };
    }

    let total_mentions: u64 = sources.iter().map(|s| s.mentions).sum();
    let score = if total_mentions > 0 {
        sources
            .iter()
            .map(|s| s.sentiment * s.mentions as f64)
            .sum::<f64>()
            / total_mentions as f64
    } else {
        sources.iter().map(|s| s.sentiment).sum::<f64>() / sources.len() as f64
    };

    let label = if score >= BULLISH_THRESHOLD {
        SentimentLabel::Bullish
    } else if score <= BEARISH_THRESHOLD {
        SentimentLabel::Bearish
    } else {
        SentimentLabel::Neutral
    };

    SentimentSummary {
        score,
        label,
        sources,
    }
}
