//! Search-ad command handlers.

use std::path::PathBuf;

use brandpulse_core::AppConfig;
use brandpulse_gateway::tasks::{
    diagnose_report, generate_ad_copy, score_keywords, AdCopyRequest, MAX_PROMPT_ROWS,
};
use clap::Subcommand;

use crate::geo::print_list;
use crate::{build_gateway, connect, load_knowledge};

/// History category for saved report diagnoses.
const HISTORY_CATEGORY: &str = "sem";

/// Sub-commands available under `sem`.
#[derive(Debug, Subcommand)]
pub enum SemCommands {
    /// Score candidate keywords for a product
    Keywords {
        #[arg(long)]
        product: String,
        /// Candidate keyword; repeat for several
        #[arg(long = "keyword", required = true)]
        keywords: Vec<String>,
        /// Knowledge-base category to use as reference material
        #[arg(long)]
        kb: Option<String>,
    },
    /// Draft search-ad variants
    Adcopy {
        #[arg(long)]
        product: String,
        #[arg(long)]
        keyword: String,
        #[arg(long, default_value = "")]
        audience: String,
        /// Knowledge-base category to use as reference material
        #[arg(long)]
        kb: Option<String>,
    },
    /// Diagnose an exported campaign report
    Diagnose {
        file: PathBuf,
        /// Knowledge-base category to use as reference material
        #[arg(long)]
        kb: Option<String>,
        /// Store the diagnosis in history
        #[arg(long)]
        save: bool,
    },
}

/// Dispatch a `sem` sub-command.
///
/// # Errors
///
/// Returns an error on blank input, an unreadable report, or when every
/// model in the chain fails.
pub(crate) async fn run(config: &AppConfig, command: SemCommands) -> anyhow::Result<()> {
    match command {
        SemCommands::Keywords {
            product,
            keywords,
            kb,
        } => {
            let knowledge = load_knowledge(config, kb.as_deref()).await?;
            let gateway = build_gateway(config)?;
            let report = score_keywords(&gateway, &product, &keywords, &knowledge).await?;

            println!(
                "{:<28}{:>10}  {:<15}{:<9}{:>8}",
                "KEYWORD", "RELEVANCE", "INTENT", "MATCH", "BID"
            );
            for insight in &report.keywords {
                let intent = format!("{:?}", insight.intent);
                let match_type = format!("{:?}", insight.match_type);
                println!(
                    "{:<28}{:>10}  {:<15}{:<9}{:>8}",
                    insight.keyword,
                    insight
                        .relevance
                        .map_or_else(|| "N/A".to_owned(), |r| r.to_string()),
                    intent,
                    match_type,
                    insight
                        .suggested_bid
                        .map_or_else(|| "N/A".to_owned(), |b| format!("{b:.2}")),
                );
            }
        }
        SemCommands::Adcopy {
            product,
            keyword,
            audience,
            kb,
        } => {
            let knowledge = load_knowledge(config, kb.as_deref()).await?;
            let gateway = build_gateway(config)?;
            let request = AdCopyRequest {
                product: &product,
                keyword: &keyword,
                audience: &audience,
            };
            let report = generate_ad_copy(&gateway, &request, &knowledge).await?;

            for (i, variant) in report.variants.iter().enumerate() {
                println!(
                    "{}. {}\n   {}\n   quality {} - {}",
                    i + 1,
                    variant.headline,
                    variant.description,
                    variant
                        .quality_score
                        .map_or_else(|| "N/A".to_owned(), |q| format!("{q}/10")),
                    variant.rationale
                );
            }
        }
        SemCommands::Diagnose { file, kb, save } => {
            let table = crate::report::load_report(&file)?;
            if table.rows.len() > MAX_PROMPT_ROWS {
                tracing::info!(
                    rows = table.rows.len(),
                    sent = MAX_PROMPT_ROWS,
                    "report truncated for diagnosis"
                );
            }
            let knowledge = load_knowledge(config, kb.as_deref()).await?;
            let gateway = build_gateway(config)?;
            let diagnosis = diagnose_report(&gateway, &table, &knowledge).await?;

            println!("{}", diagnosis.summary);
            print_list("anomalies", &diagnosis.anomalies);
            print_list("recommendations", &diagnosis.recommendations);
            println!("\nbid strategy: {}", diagnosis.bid_strategy);

            if save {
                let pool = connect(config).await?;
                let title = file.file_name().map_or_else(
                    || file.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                let payload = serde_json::to_value(&diagnosis)?;
                let entry =
                    brandpulse_db::insert_history_entry(&pool, HISTORY_CATEGORY, &title, payload)
                        .await?;
                println!("saved as {}", entry.id);
            }
        }
    }
    Ok(())
}
