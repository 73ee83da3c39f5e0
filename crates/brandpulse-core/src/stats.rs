//! Summary statistics over a set of persona analysis records.
//!
//! [`aggregate`] is a pure function of the record slice and the target brand:
//! calling it twice on the same input always yields the same output.

use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::{AnalysisRecord, Sentiment};

/// Maximum number of competitors kept in [`AggregatedStats::top_competitors`].
pub const TOP_COMPETITORS: usize = 5;

const RANK_BONUS: f64 = 10.0;
const RANK_BONUS_THRESHOLD: f64 = 3.0;
const NEGATIVE_PENALTY: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub unknown: usize,
}

impl SentimentCounts {
    fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Unknown => self.unknown += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorStat {
    pub name: String,
    pub mentions: usize,
    /// Mean rank across mentions that carried one, to one decimal place.
    pub average_rank: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedStats {
    /// Share-of-recommendation score in `0..=100`.
    pub visibility_score: u8,
    /// Mean rank across ranked records, to one decimal place.
    pub average_rank: Option<f64>,
    pub mentioned_count: usize,
    pub total_records: usize,
    pub sentiment: SentimentCounts,
    pub top_competitors: Vec<CompetitorStat>,
}

impl Default for AggregatedStats {
    fn default() -> Self {
        Self {
            visibility_score: 0,
            average_rank: None,
            mentioned_count: 0,
            total_records: 0,
            sentiment: SentimentCounts::default(),
            top_competitors: Vec::new(),
        }
    }
}

/// Compute [`AggregatedStats`] for `brand` from the current record set.
///
/// An empty slice yields [`AggregatedStats::default`].
#[must_use]
pub fn aggregate(records: &[AnalysisRecord], brand: &str) -> AggregatedStats {
    if records.is_empty() {
        return AggregatedStats::default();
    }

    let mentioned_count = records.iter().filter(|r| r.brand_mentioned).count();
    let ranks: Vec<u32> = records.iter().filter_map(|r| r.rank).collect();
    let raw_average_rank = mean(&ranks);
    let has_negative = records.iter().any(|r| r.sentiment == Sentiment::Negative);

    let mut sentiment = SentimentCounts::default();
    for record in records {
        sentiment.record(record.sentiment);
    }

    AggregatedStats {
        visibility_score: visibility_score(
            mentioned_count,
            records.len(),
            raw_average_rank,
            has_negative,
        ),
        average_rank: raw_average_rank.map(round_one_decimal),
        mentioned_count,
        total_records: records.len(),
        sentiment,
        top_competitors: top_competitors(records, brand),
    }
}

/// Base mention share, then the rank bonus, then the negative penalty,
/// clamped to `0..=100` and rounded.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn visibility_score(
    mentioned: usize,
    total: usize,
    average_rank: Option<f64>,
    has_negative: bool,
) -> u8 {
    if total == 0 {
        return 0;
    }
    let mut score = 100.0 * (mentioned as f64 / total as f64);
    if average_rank.is_some_and(|avg| avg <= RANK_BONUS_THRESHOLD) {
        score += RANK_BONUS;
    }
    if has_negative {
        score -= NEGATIVE_PENALTY;
    }
    score.clamp(0.0, 100.0).round() as u8
}

fn top_competitors(records: &[AnalysisRecord], brand: &str) -> Vec<CompetitorStat> {
    let brand_key = brand.trim().to_lowercase();

    // Encounter order is preserved in `tallies`; `index` maps the folded name
    // back to its slot.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<(String, usize, Vec<u32>)> = Vec::new();

    for mention in records.iter().flat_map(|r| r.competitors.iter()) {
        let name = mention.name.trim();
        let key = name.to_lowercase();
        if key.is_empty() || (!brand_key.is_empty() && key.contains(&brand_key)) {
            continue;
        }
        let slot = *index.entry(key).or_insert_with(|| {
            tallies.push((name.to_string(), 0, Vec::new()));
            tallies.len() - 1
        });
        let entry = &mut tallies[slot];
        entry.1 += 1;
        if let Some(rank) = mention.rank {
            entry.2.push(rank);
        }
    }

    // `sort_by` is stable, so ties keep first-seen order.
    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    tallies
        .into_iter()
        .take(TOP_COMPETITORS)
        .map(|(name, mentions, ranks)| CompetitorStat {
            name,
            mentions,
            average_rank: mean(&ranks).map(round_one_decimal),
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| f64::from(v)).sum();
    Some(sum / values.len() as f64)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
