//! Search-ad copy generation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use brandpulse_core::defaults::{not_available, null_as_default, text_or_na};

use super::{array_of, integer, nullable, object, require, string, with_reference};
use crate::backend::{GenerateRequest, ModelBackend};
use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Number of ad variants requested per call.
pub const VARIANTS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct AdCopyRequest<'a> {
    pub product: &'a str,
    pub keyword: &'a str,
    pub audience: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdVariant {
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub headline: String,
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub description: String,
    /// Predicted 1-10 quality score.
    #[serde(default)]
    pub quality_score: Option<u8>,
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdCopyReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<AdVariant>,
}

#[must_use]
pub fn ad_copy_schema() -> Value {
    let variant = object(
        &[
            ("headline", string()),
            ("description", string()),
            ("qualityScore", nullable(integer())),
            ("rationale", string()),
        ],
        &["headline", "description"],
    );
    object(&[("variants", array_of(variant))], &["variants"])
}

/// Draft search-ad variants for a product and keyword.
///
/// # Errors
///
/// Returns [`GatewayError::MissingInput`] for a blank product or keyword,
/// otherwise the gateway error if every model fails.
pub async fn generate_ad_copy<B: ModelBackend>(
    gateway: &Gateway<B>,
    input: &AdCopyRequest<'_>,
    knowledge: &[String],
) -> Result<AdCopyReport, GatewayError> {
    let product = require("product", input.product)?;
    let keyword = require("keyword", input.keyword)?;
    let audience = match input.audience.trim() {
        "" => "general consumers",
        a => a,
    };

    let prompt = format!(
        "Write {VARIANTS} search ad variants for \"{product}\" targeting the keyword \
         \"{keyword}\" and the audience: {audience}. Headlines must be at most 30 characters and \
         descriptions at most 90. For each variant predict a 1-10 quality score (ad relevance, \
         expected CTR, landing page fit) and explain it in one sentence."
    );
    let request = GenerateRequest::new(with_reference(prompt, knowledge))
        .with_schema(ad_copy_schema())
        .with_temperature(0.9);

    gateway.generate_json(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::ScriptedBackend;

    #[tokio::test]
    async fn blank_audience_falls_back_to_general() {
        let gateway = Gateway::new(
            ScriptedBackend::default().reply("m", r#"{"variants":[{"headline":"Buy Acme"}]}"#),
            vec!["m".to_owned()],
        );
        let input = AdCopyRequest {
            product: "Acme Buds",
            keyword: "earbuds",
            audience: "",
        };
        let report = generate_ad_copy(&gateway, &input, &[]).await.unwrap();
        assert_eq!(report.variants[0].headline, "Buy Acme");
        assert_eq!(report.variants[0].description, "N/A");
        assert_eq!(report.variants[0].quality_score, None);

        let calls = gateway.backend().calls.lock().unwrap();
        assert!(calls[0].1.prompt.contains("general consumers"));
    }

    #[test]
    fn null_variants_become_empty() {
        let report: AdCopyReport = serde_json::from_str(r#"{"variants":null}"#).unwrap();
        assert!(report.variants.is_empty());
    }
}
