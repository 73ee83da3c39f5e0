//! Search-ad keyword scoring.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use brandpulse_core::defaults::{not_available, null_as_default, text_or_na};

use super::{array_of, integer, nullable, number, object, one_of, require, string, with_reference};
use crate::backend::{GenerateRequest, ModelBackend};
use crate::error::GatewayError;
use crate::gateway::Gateway;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchIntent {
    Informational,
    Navigational,
    Commercial,
    Transactional,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Exact,
    Phrase,
    Broad,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordInsight {
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub keyword: String,
    /// 1-10 relevance to the product.
    #[serde(default)]
    pub relevance: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intent: SearchIntent,
    /// Suggested max CPC in the account currency.
    #[serde(default)]
    pub suggested_bid: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_type: MatchType,
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<KeywordInsight>,
}

#[must_use]
pub fn keyword_schema() -> Value {
    let insight = object(
        &[
            ("keyword", string()),
            ("relevance", nullable(integer())),
            (
                "intent",
                one_of(&[
                    "Informational",
                    "Navigational",
                    "Commercial",
                    "Transactional",
                    "Unknown",
                ]),
            ),
            ("suggestedBid", nullable(number())),
            ("matchType", one_of(&["Exact", "Phrase", "Broad", "Unknown"])),
            ("rationale", string()),
        ],
        &["keyword", "relevance", "intent"],
    );
    object(&[("keywords", array_of(insight))], &["keywords"])
}

/// Score candidate keywords for a product.
///
/// # Errors
///
/// Returns [`GatewayError::MissingInput`] for a blank product or an empty
/// keyword list, otherwise the gateway error if every model fails.
pub async fn score_keywords<B: ModelBackend>(
    gateway: &Gateway<B>,
    product: &str,
    keywords: &[String],
    knowledge: &[String],
) -> Result<KeywordReport, GatewayError> {
    let product = require("product", product)?;
    let keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(GatewayError::MissingInput("keywords".to_owned()));
    }

    let prompt = format!(
        "You are a search advertising strategist. For the product \"{product}\", evaluate each \
         keyword below. Give relevance from 1 to 10, the searcher's intent, a suggested maximum \
         cost-per-click, the best match type, and a one-line rationale.\n\nKeywords:\n{}",
        keywords
            .iter()
            .map(|k| format!("- {k}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
    let request = GenerateRequest::new(with_reference(prompt, knowledge))
        .with_schema(keyword_schema())
        .with_temperature(0.3);

    gateway.generate_json(&request).await
}
