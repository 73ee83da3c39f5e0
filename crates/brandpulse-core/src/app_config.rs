use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_primary_model: String,
    pub gemini_fallback_model: String,
    pub gemini_request_timeout_secs: u64,
    pub personas_path: PathBuf,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Model identifiers in the order they should be tried.
    #[must_use]
    pub fn model_chain(&self) -> [String; 2] {
        [
            self.gemini_primary_model.clone(),
            self.gemini_fallback_model.clone(),
        ]
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_primary_model", &self.gemini_primary_model)
            .field("gemini_fallback_model", &self.gemini_fallback_model)
            .field(
                "gemini_request_timeout_secs",
                &self.gemini_request_timeout_secs,
            )
            .field("personas_path", &self.personas_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
