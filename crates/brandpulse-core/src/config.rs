use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.0-flash";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;
    let env = parse_environment(&or_default("BRANDPULSE_ENV", "development"))?;
    let log_level = or_default("BRANDPULSE_LOG_LEVEL", "info");

    let gemini_base_url = or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let gemini_primary_model = or_default("GEMINI_PRIMARY_MODEL", DEFAULT_PRIMARY_MODEL);
    let gemini_fallback_model = or_default("GEMINI_FALLBACK_MODEL", DEFAULT_FALLBACK_MODEL);
    let gemini_request_timeout_secs = parse_u64("GEMINI_REQUEST_TIMEOUT_SECS", "120")?;

    let personas_path = PathBuf::from(or_default(
        "BRANDPULSE_PERSONAS_PATH",
        "./config/personas.yaml",
    ));

    let database_url = lookup("DATABASE_URL").ok().filter(|v| !v.is_empty());
    let db_max_connections = parse_u32("BRANDPULSE_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("BRANDPULSE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BRANDPULSE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        log_level,
        gemini_api_key,
        gemini_base_url,
        gemini_primary_model,
        gemini_fallback_model,
        gemini_request_timeout_secs,
        personas_path,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDPULSE_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
