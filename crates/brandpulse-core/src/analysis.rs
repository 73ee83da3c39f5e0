//! Per-persona brand visibility records returned by the analysis gateway.

use serde::{Deserialize, Serialize};

use crate::defaults::{not_available, null_as_default, text_or_na};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    #[default]
    Unknown,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Where in the purchase funnel the answer places the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyingStage {
    Awareness,
    Consideration,
    Decision,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorMention {
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub name: String,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment: Sentiment,
}

/// One simulated model's answer about the target brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Persona id. Assigned by the caller, not by the model.
    #[serde(default)]
    pub model_id: String,
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_mentioned: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitors: Vec<CompetitorMention>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pros: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cons: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buying_stage: BuyingStage,
    /// Set only by [`AnalysisRecord::failed`]; never read from model output.
    #[serde(skip)]
    pub failed: bool,
}

impl AnalysisRecord {
    /// Placeholder record for a persona whose gateway call failed.
    #[must_use]
    pub fn failed(model_id: &str, message: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            summary: format!("Analysis failed: {message}"),
            brand_mentioned: false,
            sentiment: Sentiment::Unknown,
            rank: None,
            competitors: Vec::new(),
            pros: Vec::new(),
            cons: Vec::new(),
            buying_stage: BuyingStage::Unknown,
            failed: true,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_response_fills_defaults() {
        let record: AnalysisRecord = serde_json::from_str(r#"{"brandMentioned": true}"#).unwrap();
        assert!(record.brand_mentioned);
        assert_eq!(record.summary, "N/A");
        assert_eq!(record.sentiment, Sentiment::Unknown);
        assert_eq!(record.rank, None);
        assert!(record.competitors.is_empty());
        assert_eq!(record.buying_stage, BuyingStage::Unknown);
    }

    #[test]
    fn null_enums_become_unknown() {
        let record: AnalysisRecord =
            serde_json::from_str(r#"{"sentiment": null, "buyingStage": null, "rank": null}"#)
                .unwrap();
        assert_eq!(record.sentiment, Sentiment::Unknown);
        assert_eq!(record.buying_stage, BuyingStage::Unknown);
    }

    #[test]
    fn unknown_sentiment_value_is_rejected() {
        let result = serde_json::from_str::<AnalysisRecord>(r#"{"sentiment": "Ecstatic"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn full_response_parses_competitors() {
        let json = r#"{
            "summary": "Acme leads the category",
            "brandMentioned": true,
            "sentiment": "Positive",
            "rank": 1,
            "competitors": [
                {"name": "Globex", "rank": 2, "sentiment": "Neutral"},
                {"name": "Initech", "rank": null}
            ],
            "pros": ["price"],
            "cons": null,
            "buyingStage": "Decision"
        }"#;
        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.rank, Some(1));
        assert_eq!(record.competitors.len(), 2);
        assert_eq!(record.competitors[1].sentiment, Sentiment::Unknown);
        assert!(record.cons.is_empty());
        assert_eq!(record.buying_stage, BuyingStage::Decision);
    }

    #[test]
    fn failed_record_is_flagged() {
        let record = AnalysisRecord::failed("gpt-persona", "quota exceeded");
        assert!(record.is_failed());
        assert!(!record.brand_mentioned);
        assert_eq!(record.model_id, "gpt-persona");
        assert_eq!(record.summary, "Analysis failed: quota exceeded");
    }

    #[test]
    fn model_summary_cannot_mark_record_failed() {
        let json = r#"{"summary": "Analysis failed: the brand was not found", "failed": true}"#;
        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_failed());
    }
}
