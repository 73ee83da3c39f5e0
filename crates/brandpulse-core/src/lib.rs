//! Shared configuration, domain types, and aggregation for BrandPulse.

pub mod analysis;
pub mod app_config;
pub mod config;
pub mod defaults;
pub mod optimistic;
pub mod personas;
pub mod stats;

use thiserror::Error;

pub use analysis::{AnalysisRecord, BuyingStage, CompetitorMention, Sentiment};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use optimistic::Optimistic;
pub use personas::{default_personas, load_personas, Persona, PersonasFile};
pub use stats::{aggregate, AggregatedStats, CompetitorStat, SentimentCounts};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read personas file {path}: {source}")]
    PersonasFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse personas file: {0}")]
    PersonasFileParse(#[from] serde_yaml::Error),

    #[error("personas validation failed: {0}")]
    Validation(String),
}
