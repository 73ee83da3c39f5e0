use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model {model} returned HTTP {status}: {message}")]
    UnexpectedStatus {
        model: String,
        status: u16,
        message: String,
    },

    #[error("model {model} returned no text: {reason}")]
    EmptyResponse { model: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Every model in the chain failed. Displays the last model's error.
    #[error("{last}")]
    ModelsExhausted { last: Box<GatewayError> },

    #[error("no models configured")]
    NoModels,

    #[error("missing required input: {0}")]
    MissingInput(String),
}
