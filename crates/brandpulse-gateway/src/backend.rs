use std::future::Future;

use crate::error::GatewayError;

/// A single text-generation call: prompt, optional system instruction, and
/// an optional declared JSON response shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub system: Option<String>,
    pub schema: Option<serde_json::Value>,
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            schema: None,
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Something that can turn a request into raw model text for a named model.
pub trait ModelBackend {
    fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}
