//! Knowledge-base, history and configuration-option handlers.
//!
//! All of these require `DATABASE_URL`; `main` connects before dispatching.

use brandpulse_core::Optimistic;
use clap::Subcommand;
use uuid::Uuid;

/// Sub-commands available under `kb`.
#[derive(Debug, Subcommand)]
pub enum KbCommands {
    /// Add a snippet to a category
    Add {
        #[arg(long)]
        category: String,
        #[arg(long)]
        content: String,
    },
    /// List snippets in a category
    List {
        #[arg(long)]
        category: String,
    },
    /// Delete a snippet
    Delete {
        #[arg(long)]
        category: String,
        id: Uuid,
    },
}

/// Sub-commands available under `history`.
#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// List saved runs, newest first
    List {
        /// Filter by category (geo, sem)
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "20")]
        limit: i64,
    },
    /// Delete a saved run
    Delete { id: Uuid },
}

/// Sub-commands available under `config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Set an option, replacing any existing value
    Set {
        category: String,
        key: String,
        value: String,
    },
    /// List options in a category
    List { category: String },
    /// Remove an option
    Delete { category: String, key: String },
}

/// # Errors
///
/// Returns an error if the database operation fails or the snippet does not
/// exist.
pub(crate) async fn run_kb(pool: &sqlx::PgPool, command: KbCommands) -> anyhow::Result<()> {
    match command {
        KbCommands::Add { category, content } => {
            let content = content.trim();
            if content.is_empty() {
                anyhow::bail!("snippet content must not be blank");
            }
            let row = brandpulse_db::insert_knowledge_snippet(pool, &category, content).await?;
            println!("added {}", row.id);
        }
        KbCommands::List { category } => {
            let snippets = brandpulse_db::list_knowledge_snippets(pool, &category).await?;
            if snippets.is_empty() {
                println!("no snippets in category '{category}'");
            }
            for snippet in &snippets {
                println!("{}  {}", snippet.id, snippet.content);
            }
        }
        KbCommands::Delete { category, id } => {
            let snippets = brandpulse_db::list_knowledge_snippets(pool, &category).await?;
            let mut local = Optimistic::new(snippets);
            local
                .apply(
                    |items| items.retain(|s| s.id != id),
                    || brandpulse_db::delete_knowledge_snippet(pool, id),
                )
                .await?;
            println!(
                "deleted {id}; {} snippets left in '{category}'",
                local.items().len()
            );
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the database operation fails or the entry does not
/// exist.
pub(crate) async fn run_history(
    pool: &sqlx::PgPool,
    command: HistoryCommands,
) -> anyhow::Result<()> {
    match command {
        HistoryCommands::List { category, limit } => {
            let entries =
                brandpulse_db::list_history_entries(pool, category.as_deref(), limit).await?;
            if entries.is_empty() {
                println!("no saved runs");
                return Ok(());
            }
            println!("{:<38}{:<6}{:<18}TITLE", "ID", "TYPE", "CREATED");
            for entry in &entries {
                println!(
                    "{:<38}{:<6}{:<18}{}",
                    entry.id,
                    entry.category,
                    entry.created_at.format("%Y-%m-%d %H:%M"),
                    entry.title
                );
            }
        }
        HistoryCommands::Delete { id } => {
            brandpulse_db::delete_history_entry(pool, id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the database operation fails or the option does not
/// exist.
pub(crate) async fn run_config(pool: &sqlx::PgPool, command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Set {
            category,
            key,
            value,
        } => {
            let row = brandpulse_db::upsert_config_option(pool, &category, &key, &value).await?;
            println!("{}.{} = {}", row.category, row.key, row.value);
        }
        ConfigCommands::List { category } => {
            for row in brandpulse_db::list_config_options(pool, &category).await? {
                println!("{} = {}", row.key, row.value);
            }
        }
        ConfigCommands::Delete { category, key } => {
            brandpulse_db::delete_config_option(pool, &category, &key).await?;
            println!("removed {category}.{key}");
        }
    }
    Ok(())
}
