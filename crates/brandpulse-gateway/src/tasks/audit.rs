//! Content audit for answer-engine citation readiness.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use brandpulse_core::defaults::null_as_default;

use super::{array_of, integer, nullable, object, require, string, with_reference};
use crate::backend::{GenerateRequest, ModelBackend};
use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Content longer than this many characters is truncated in the prompt.
const MAX_CONTENT_CHARS: usize = 20_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAudit {
    /// 0-100 likelihood of the content being cited by an answer engine.
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

#[must_use]
pub fn audit_schema() -> Value {
    object(
        &[
            ("score", nullable(integer())),
            ("strengths", array_of(string())),
            ("weaknesses", array_of(string())),
            ("suggestions", array_of(string())),
        ],
        &["score", "suggestions"],
    )
}

/// Audit a page or article for how well it would be surfaced and cited by
/// LLM answer engines when users ask about `brand`.
///
/// # Errors
///
/// Returns [`GatewayError::MissingInput`] for a blank brand or content,
/// otherwise the gateway error if every model fails.
pub async fn audit_content<B: ModelBackend>(
    gateway: &Gateway<B>,
    brand: &str,
    content: &str,
    knowledge: &[String],
) -> Result<ContentAudit, GatewayError> {
    let brand = require("brand", brand)?;
    let content = require("content", content)?;
    let excerpt: String = content.chars().take(MAX_CONTENT_CHARS).collect();

    let prompt = format!(
        "Audit the following content published by \"{brand}\" for generative engine \
         optimization. Score from 0 to 100 how likely an AI answer engine is to cite it, list its \
         strengths and weaknesses (structure, factual density, entity clarity, freshness), and \
         give specific rewrite suggestions.\n\n---\n{excerpt}\n---"
    );
    let request = GenerateRequest::new(with_reference(prompt, knowledge))
        .with_schema(audit_schema())
        .with_temperature(0.2);

    gateway.generate_json(&request).await
}
