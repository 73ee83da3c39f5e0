mod dashboard;
mod geo;
mod report;
mod sem;
mod store;

use std::path::PathBuf;

use anyhow::Context;
use brandpulse_core::{AppConfig, Persona};
use brandpulse_gateway::{Gateway, GeminiClient};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::sem::SemCommands;
use crate::store::{ConfigCommands, HistoryCommands, KbCommands};

#[derive(Debug, Parser)]
#[command(name = "brandpulse-cli")]
#[command(about = "Brand visibility and search-ad analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load an ad-platform report export and print the filtered table
    Ingest {
        /// CSV or TSV export (UTF-8, GBK or GB18030)
        file: PathBuf,
        #[command(flatten)]
        view: report::ViewArgs,
    },
    /// Ask every persona about a category and score the brand's visibility
    Geo {
        #[arg(long)]
        brand: String,
        /// Category query, e.g. "wireless earbuds"
        #[arg(long)]
        keyword: String,
        /// Knowledge-base category to use as reference material
        #[arg(long)]
        kb: Option<String>,
        /// Store the run in history
        #[arg(long)]
        save: bool,
    },
    /// Audit a page or article for answer-engine citability
    Audit {
        #[arg(long)]
        brand: String,
        /// Text or markdown file with the content
        #[arg(long)]
        file: PathBuf,
        /// Knowledge-base category to use as reference material
        #[arg(long)]
        kb: Option<String>,
    },
    /// Search-ad tasks
    Sem {
        #[command(subcommand)]
        command: SemCommands,
    },
    /// Manage knowledge-base snippets
    Kb {
        #[command(subcommand)]
        command: KbCommands,
    },
    /// Browse saved runs
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Manage configuration options
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check that the database is reachable
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Local report viewing needs neither the model API key nor a database.
    if let Commands::Ingest { file, view } = &cli.command {
        init_tracing("info");
        return report::run_ingest(file, view);
    }

    let config = brandpulse_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Ingest { file, view } => report::run_ingest(&file, &view),
        Commands::Geo {
            brand,
            keyword,
            kb,
            save,
        } => geo::run_geo(&config, &brand, &keyword, kb.as_deref(), save).await,
        Commands::Audit { brand, file, kb } => {
            geo::run_audit(&config, &brand, &file, kb.as_deref()).await
        }
        Commands::Sem { command } => sem::run(&config, command).await,
        Commands::Kb { command } => store::run_kb(&connect(&config).await?, command).await,
        Commands::History { command } => {
            store::run_history(&connect(&config).await?, command).await
        }
        Commands::Config { command } => {
            store::run_config(&connect(&config).await?, command).await
        }
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Migrate => {
                    brandpulse_db::run_migrations(&pool).await?;
                    println!("migrations applied");
                }
                DbCommands::Ping => {
                    brandpulse_db::ping(&pool).await?;
                    println!("database reachable");
                }
            }
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level applies.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    brandpulse_db::connect_from_app_config(config)
        .await
        .context("failed to connect to the database")
}

fn build_gateway(config: &AppConfig) -> anyhow::Result<Gateway<GeminiClient>> {
    let client = GeminiClient::from_config(config)?;
    Ok(Gateway::new(client, config.model_chain()))
}

/// Personas from the configured file, or the built-in set when it is absent.
fn load_persona_list(config: &AppConfig) -> anyhow::Result<Vec<Persona>> {
    if !config.personas_path.exists() {
        tracing::info!(
            path = %config.personas_path.display(),
            "personas file not found; using built-in personas"
        );
        return Ok(brandpulse_core::default_personas());
    }
    let file = brandpulse_core::load_personas(&config.personas_path)?;
    Ok(file.personas)
}

/// Snippet texts for `category`, or nothing when no category was requested.
async fn load_knowledge(config: &AppConfig, category: Option<&str>) -> anyhow::Result<Vec<String>> {
    let Some(category) = category else {
        return Ok(Vec::new());
    };
    let pool = connect(config).await?;
    let snippets = brandpulse_db::list_knowledge_snippets(&pool, category).await?;
    tracing::debug!(category, count = snippets.len(), "loaded knowledge snippets");
    Ok(snippets.into_iter().map(|s| s.content).collect())
}

#[cfg(test)]
mod tests;
