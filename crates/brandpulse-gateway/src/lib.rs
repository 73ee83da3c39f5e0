//! Gateway to the hosted LLM used for every analysis task.
//!
//! Builds task prompts and response schemas, calls Gemini through a
//! primary/fallback model chain, and decodes the JSON reply into typed results
//! with defaults filled in for anything the model omitted.

pub mod backend;
pub mod client;
pub mod error;
pub mod gateway;
pub mod response;
pub mod tasks;

pub use backend::{GenerateRequest, ModelBackend};
pub use client::GeminiClient;
pub use error::GatewayError;
pub use gateway::Gateway;
pub use response::{parse_json, strip_code_fences};
