//! Generative-engine visibility: how each persona answers a category query
//! and where the target brand lands in that answer.

use brandpulse_core::{AnalysisRecord, Persona};
use futures::future::join_all;
use serde_json::Value;

use super::{array_of, boolean, integer, nullable, object, one_of, require, string, with_reference};
use crate::backend::{GenerateRequest, ModelBackend};
use crate::error::GatewayError;
use crate::gateway::Gateway;

const SENTIMENTS: &[&str] = &["Positive", "Neutral", "Negative", "Unknown"];
const BUYING_STAGES: &[&str] = &["Awareness", "Consideration", "Decision", "Unknown"];

#[derive(Debug, Clone, Copy)]
pub struct VisibilityQuery<'a> {
    pub brand: &'a str,
    pub keyword: &'a str,
    pub knowledge: &'a [String],
}

#[must_use]
pub fn visibility_schema() -> Value {
    let competitor = object(
        &[
            ("name", string()),
            ("rank", nullable(integer())),
            ("sentiment", one_of(SENTIMENTS)),
        ],
        &["name"],
    );
    object(
        &[
            ("summary", string()),
            ("brandMentioned", boolean()),
            ("sentiment", one_of(SENTIMENTS)),
            ("rank", nullable(integer())),
            ("competitors", array_of(competitor)),
            ("pros", array_of(string())),
            ("cons", array_of(string())),
            ("buyingStage", one_of(BUYING_STAGES)),
        ],
        &["summary", "brandMentioned", "sentiment"],
    )
}

#[must_use]
pub fn visibility_request(persona: &Persona, query: &VisibilityQuery<'_>) -> GenerateRequest {
    let system = format!(
        "You are simulating the AI assistant \"{}\". {}",
        persona.name, persona.description
    );
    let prompt = format!(
        "A user asks you: \"What are the best options for {keyword}?\"\n\
         Answer as {name} normally would, then analyse your own answer with respect to the brand \"{brand}\":\n\
         - summary: two or three sentences summarising your recommendation\n\
         - brandMentioned: whether \"{brand}\" appears in your answer\n\
         - sentiment: your tone toward \"{brand}\" (Positive, Neutral, Negative, or Unknown if not mentioned)\n\
         - rank: the 1-based position of \"{brand}\" in your recommendation list, or null\n\
         - competitors: every other brand you recommended, with its rank and sentiment\n\
         - pros / cons: short phrases you associate with \"{brand}\"\n\
         - buyingStage: the purchase stage the question implies (Awareness, Consideration, Decision)\n\
         Respond with JSON only.",
        keyword = query.keyword,
        name = persona.name,
        brand = query.brand,
    );
    GenerateRequest::new(with_reference(prompt, query.knowledge))
        .with_system(system)
        .with_schema(visibility_schema())
}

/// Run the visibility analysis for a single persona.
///
/// # Errors
///
/// Returns the gateway error if every model in the chain fails.
pub async fn analyze_persona<B: ModelBackend>(
    gateway: &Gateway<B>,
    persona: &Persona,
    query: &VisibilityQuery<'_>,
) -> Result<AnalysisRecord, GatewayError> {
    let request = visibility_request(persona, query);
    let mut record: AnalysisRecord = gateway.generate_json(&request).await?;
    record.model_id.clone_from(&persona.id);
    Ok(record)
}

/// Query every persona concurrently and wait for all of them.
///
/// A persona whose call fails becomes an [`AnalysisRecord::failed`] entry;
/// the others are unaffected. Records come back in persona order.
///
/// # Errors
///
/// Returns [`GatewayError::MissingInput`] if the brand or keyword is blank.
pub async fn analyze_visibility<B: ModelBackend>(
    gateway: &Gateway<B>,
    personas: &[Persona],
    query: &VisibilityQuery<'_>,
) -> Result<Vec<AnalysisRecord>, GatewayError> {
    let query = VisibilityQuery {
        brand: require("brand", query.brand)?,
        keyword: require("keyword", query.keyword)?,
        knowledge: query.knowledge,
    };

    let calls = personas.iter().map(|persona| async move {
        match analyze_persona(gateway, persona, &query).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(persona = %persona.id, error = %e, "persona analysis failed");
                AnalysisRecord::failed(&persona.id, &e.to_string())
            }
        }
    });

    let records = join_all(calls).await;
    tracing::info!(
        brand = query.brand,
        personas = records.len(),
        failed = records.iter().filter(|r| r.is_failed()).count(),
        "visibility analysis complete"
    );
    Ok(records)
}
