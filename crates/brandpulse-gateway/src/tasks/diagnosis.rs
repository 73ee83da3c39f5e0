//! Report diagnosis: the ingested table is serialized into the prompt and the
//! model returns anomalies and bid guidance.

use brandpulse_ingest::Table;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use brandpulse_core::defaults::{not_available, null_as_default, text_or_na};

use super::{array_of, object, string, with_reference};
use crate::backend::{GenerateRequest, ModelBackend};
use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Rows beyond this count are omitted from the prompt.
pub const MAX_PROMPT_ROWS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDiagnosis {
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anomalies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub bid_strategy: String,
}

#[must_use]
pub fn diagnosis_schema() -> Value {
    object(
        &[
            ("summary", string()),
            ("anomalies", array_of(string())),
            ("recommendations", array_of(string())),
            ("bidStrategy", string()),
        ],
        &["summary", "anomalies", "recommendations"],
    )
}

/// Tab-separated rendering of the table, capped at [`MAX_PROMPT_ROWS`].
#[must_use]
pub fn render_table(table: &Table) -> String {
    let mut out = table.columns.join("\t");
    for row in table.rows.iter().take(MAX_PROMPT_ROWS) {
        out.push('\n');
        out.push_str(&row.values.join("\t"));
    }
    if table.rows.len() > MAX_PROMPT_ROWS {
        out.push_str(&format!(
            "\n... ({} more rows omitted)",
            table.rows.len() - MAX_PROMPT_ROWS
        ));
    }
    out
}

/// Ask the model to diagnose an ingested ad-platform report.
///
/// # Errors
///
/// Returns [`GatewayError::MissingInput`] for a table with no rows, otherwise
/// the gateway error if every model fails.
pub async fn diagnose_report<B: ModelBackend>(
    gateway: &Gateway<B>,
    table: &Table,
    knowledge: &[String],
) -> Result<ReportDiagnosis, GatewayError> {
    if table.rows.is_empty() {
        return Err(GatewayError::MissingInput("report rows".to_owned()));
    }

    let prompt = format!(
        "You are a paid-search analyst. Below is an exported campaign report ({} rows, \
         tab-separated). Identify anomalies such as spend without clicks, very low CTR, or cost \
         spikes; give concrete recommendations; and propose a bid strategy.\n\n{}",
        table.rows.len(),
        render_table(table)
    );
    let request = GenerateRequest::new(with_reference(prompt, knowledge))
        .with_schema(diagnosis_schema())
        .with_temperature(0.2);

    gateway.generate_json(&request).await
}

#[cfg(test)]
mod tests {
    use brandpulse_ingest::{ingest_text, IngestOptions};

    use super::*;
    use crate::gateway::tests::ScriptedBackend;

    fn report(rows: usize) -> Table {
        let mut text = String::from("Keyword,Impressions,Clicks,Cost\n");
        for i in 0..rows {
            text.push_str(&format!("kw{i},{},{},{}\n", 100 + i, i % 7, i * 2));
        }
        ingest_text(&text, IngestOptions::default()).unwrap()
    }

    #[test]
    fn render_table_caps_rows() {
        let rendered = render_table(&report(MAX_PROMPT_ROWS + 5));
        assert!(rendered.starts_with("Keyword\tImpressions\tClicks\tCost\nkw0\t100\t0\t0"));
        assert!(rendered.ends_with("(5 more rows omitted)"));
        assert_eq!(rendered.lines().count(), MAX_PROMPT_ROWS + 2);
    }

    #[tokio::test]
    async fn diagnosis_fills_defaults() {
        let gateway = Gateway::new(
            ScriptedBackend::default().reply("m", r#"{"summary":"CTR is low","anomalies":["kw3 spend without clicks"]}"#),
            vec!["m".to_owned()],
        );
        let diagnosis = diagnose_report(&gateway, &report(4), &[]).await.unwrap();
        assert_eq!(diagnosis.anomalies.len(), 1);
        assert!(diagnosis.recommendations.is_empty());
        assert_eq!(diagnosis.bid_strategy, "N/A");

        let calls = gateway.backend().calls.lock().unwrap();
        assert!(calls[0].1.prompt.contains("(4 rows, tab-separated)"));
    }
}
