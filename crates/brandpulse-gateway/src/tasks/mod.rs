//! Task catalogue: one prompt, response schema, and typed result per task.
//!
//! Schemas use the OpenAPI subset Gemini accepts for `responseSchema`.

pub mod ad_copy;
pub mod audit;
pub mod diagnosis;
pub mod keywords;
pub mod visibility;

use serde_json::{json, Value};

use crate::error::GatewayError;

pub use ad_copy::{generate_ad_copy, AdCopyReport, AdCopyRequest, AdVariant};
pub use audit::{audit_content, ContentAudit};
pub use diagnosis::{diagnose_report, ReportDiagnosis, MAX_PROMPT_ROWS};
pub use keywords::{score_keywords, KeywordInsight, KeywordReport, MatchType, SearchIntent};
pub use visibility::{analyze_persona, analyze_visibility, VisibilityQuery};

/// Reject blank required inputs before any network call.
pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, GatewayError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::MissingInput(field.to_owned()));
    }
    Ok(trimmed)
}

/// Append stored knowledge-base snippets to a prompt.
pub(crate) fn with_reference(prompt: String, snippets: &[String]) -> String {
    let snippets: Vec<&str> = snippets
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if snippets.is_empty() {
        return prompt;
    }
    let mut out = prompt;
    out.push_str("\n\nReference material (treat as ground truth about the brand):\n");
    for snippet in snippets {
        out.push_str("- ");
        out.push_str(snippet);
        out.push('\n');
    }
    out
}

pub(crate) fn string() -> Value {
    json!({ "type": "STRING" })
}

pub(crate) fn integer() -> Value {
    json!({ "type": "INTEGER" })
}

pub(crate) fn number() -> Value {
    json!({ "type": "NUMBER" })
}

pub(crate) fn boolean() -> Value {
    json!({ "type": "BOOLEAN" })
}

pub(crate) fn nullable(mut schema: Value) -> Value {
    schema["nullable"] = Value::Bool(true);
    schema
}

pub(crate) fn one_of(values: &[&str]) -> Value {
    json!({ "type": "STRING", "enum": values })
}

pub(crate) fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

pub(crate) fn object(properties: &[(&str, Value)], required: &[&str]) -> Value {
    let props: serde_json::Map<String, Value> = properties
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect();
    json!({ "type": "OBJECT", "properties": props, "required": required })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank() {
        assert!(matches!(
            require("brand", "  "),
            Err(GatewayError::MissingInput(ref f)) if f == "brand"
        ));
        assert_eq!(require("brand", " Acme ").unwrap(), "Acme");
    }

    #[test]
    fn reference_block_skips_blank_snippets() {
        let out = with_reference("Prompt".to_owned(), &["  ".to_owned()]);
        assert_eq!(out, "Prompt");

        let out = with_reference("Prompt".to_owned(), &["Founded 1999".to_owned()]);
        assert!(out.contains("Reference material"));
        assert!(out.ends_with("- Founded 1999\n"));
    }

    #[test]
    fn object_schema_lists_required_fields() {
        let schema = object(&[("name", string())], &["name"]);
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["name"]["type"], "STRING");
        assert_eq!(schema["required"][0], "name");
    }
}
