//! Ordered model chain: try each model in turn, stop at the first success.

use serde::de::DeserializeOwned;

use crate::backend::{GenerateRequest, ModelBackend};
use crate::error::GatewayError;
use crate::response::parse_json;

/// A backend plus the ordered list of models to try (primary first).
///
/// Each call re-queries the backend; nothing is cached and no model is tried
/// twice.
pub struct Gateway<B> {
    backend: B,
    models: Vec<String>,
}

impl<B: ModelBackend> Gateway<B> {
    #[must_use]
    pub fn new(backend: B, models: impl IntoIterator<Item = String>) -> Self {
        Self {
            backend,
            models: models.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Raw text from the first model that answers.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ModelsExhausted`] carrying the last model's
    /// error when every model fails, or [`GatewayError::NoModels`] for an
    /// empty chain.
    pub async fn generate_text(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        self.run(request, |text, _| Ok(text)).await
    }

    /// Structured result from the first model whose reply parses as `T`.
    ///
    /// A reply that fails to parse counts as that model's failure and moves
    /// on to the next model.
    ///
    /// # Errors
    ///
    /// See [`Gateway::generate_text`].
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        request: &GenerateRequest,
    ) -> Result<T, GatewayError> {
        self.run(request, |text, model| parse_json(&text, &format!("response from {model}")))
            .await
    }

    async fn run<T, F>(&self, request: &GenerateRequest, decode: F) -> Result<T, GatewayError>
    where
        F: Fn(String, &str) -> Result<T, GatewayError>,
    {
        let mut last_error = None;

        for (attempt, model) in self.models.iter().enumerate() {
            tracing::debug!(model = %model, attempt, "calling model");
            let outcome = match self.backend.generate(model, request).await {
                Ok(text) => decode(text, model.as_str()),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(model = %model, attempt, error = %e, "model call failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(GatewayError::ModelsExhausted {
                last: Box::new(last),
            }),
            None => Err(GatewayError::NoModels),
        }
    }
}
