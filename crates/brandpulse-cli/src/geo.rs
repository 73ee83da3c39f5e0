//! GEO command handlers: persona visibility runs and content audits.

use std::path::Path;

use anyhow::Context;
use brandpulse_core::AppConfig;
use brandpulse_gateway::tasks::{analyze_visibility, audit_content, VisibilityQuery};

use crate::dashboard::{DashboardAction, DashboardState};
use crate::{build_gateway, connect, load_knowledge, load_persona_list};

/// History category for saved visibility runs.
const HISTORY_CATEGORY: &str = "geo";

/// Run a visibility analysis across all personas and print the dashboard.
///
/// Individual persona failures are shown as failed records; only input
/// errors abort the run.
///
/// # Errors
///
/// Returns an error if the brand or keyword is blank, the personas file is
/// invalid, or `--save` is given and the history entry cannot be stored.
pub(crate) async fn run_geo(
    config: &AppConfig,
    brand: &str,
    keyword: &str,
    kb_category: Option<&str>,
    save: bool,
) -> anyhow::Result<()> {
    let personas = load_persona_list(config)?;
    let knowledge = load_knowledge(config, kb_category).await?;
    let gateway = build_gateway(config)?;

    let state = DashboardState::default().reduce(DashboardAction::Started {
        brand: brand.trim().to_owned(),
        keyword: keyword.trim().to_owned(),
    });
    let query = VisibilityQuery {
        brand,
        keyword,
        knowledge: &knowledge,
    };
    let state = match analyze_visibility(&gateway, &personas, &query).await {
        Ok(records) => state.reduce(DashboardAction::Completed(records)),
        Err(e) => state.reduce(DashboardAction::Failed(e.to_string())),
    };

    if let Some(message) = &state.error {
        anyhow::bail!("{message}");
    }
    print_dashboard(&state);

    if save {
        let pool = connect(config).await?;
        let payload = serde_json::json!({
            "brand": state.brand,
            "keyword": state.keyword,
            "records": state.records,
            "stats": state.stats,
        });
        let title = format!("{} / {}", state.brand, state.keyword);
        let entry =
            brandpulse_db::insert_history_entry(&pool, HISTORY_CATEGORY, &title, payload).await?;
        println!("saved as {}", entry.id);
    }
    Ok(())
}

fn print_dashboard(state: &DashboardState) {
    let stats = &state.stats;
    println!("{} for \"{}\"", state.brand, state.keyword);
    println!("visibility score: {}/100", stats.visibility_score);
    println!(
        "mentioned by {} of {} personas; average rank {}",
        stats.mentioned_count,
        stats.total_records,
        stats
            .average_rank
            .map_or_else(|| "N/A".to_owned(), |r| format!("{r:.1}"))
    );
    println!(
        "sentiment: {} positive, {} neutral, {} negative, {} unknown",
        stats.sentiment.positive,
        stats.sentiment.neutral,
        stats.sentiment.negative,
        stats.sentiment.unknown
    );
    if !stats.top_competitors.is_empty() {
        println!("\ntop competitors:");
        for competitor in &stats.top_competitors {
            println!(
                "  {:<24}{:>3} mentions  avg rank {}",
                competitor.name,
                competitor.mentions,
                competitor
                    .average_rank
                    .map_or_else(|| "N/A".to_owned(), |r| format!("{r:.1}"))
            );
        }
    }

    println!();
    for record in &state.records {
        let rank = record
            .rank
            .map_or_else(|| "-".to_owned(), |r| format!("#{r}"));
        println!(
            "[{}] {} {} {}",
            record.model_id, rank, record.sentiment, record.summary
        );
    }
    let failed = state.failed_records();
    if failed > 0 {
        tracing::warn!(failed, "some personas could not be analysed");
    }
}

/// Audit a content file and print the score and suggestions.
///
/// The file may be UTF-8, GBK or GB18030.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the brand or content is
/// blank, or every model fails.
pub(crate) async fn run_audit(
    config: &AppConfig,
    brand: &str,
    path: &Path,
    kb_category: Option<&str>,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content = brandpulse_ingest::decode_report(&bytes).text;
    let knowledge = load_knowledge(config, kb_category).await?;
    let gateway = build_gateway(config)?;

    let audit = audit_content(&gateway, brand, &content, &knowledge).await?;

    println!(
        "score: {}",
        audit
            .score
            .map_or_else(|| "N/A".to_owned(), |s| format!("{s}/100"))
    );
    print_list("strengths", &audit.strengths);
    print_list("weaknesses", &audit.weaknesses);
    print_list("suggestions", &audit.suggestions);
    Ok(())
}

pub(crate) fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}
