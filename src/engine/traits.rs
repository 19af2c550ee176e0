use serde_json::Value;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("transport failure: {msg}")]
    Transport { msg: String },
    #[error("malformed engine response: {msg}")]
    Malformed { msg: String },
}

/// One text-generation capability with an optional structured-output mode.
/// Any backend able to produce a grounded response can stand in here; the
/// judging workflow never talks to a concrete vendor API directly.
#[mockall::automock]
#[async_trait::async_trait]
pub trait TextEngine: std::fmt::Debug + Send + Sync {
    /// Generate a response constrained to the given JSON schema.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, EngineError>;

    /// Generate a free-form text response.
    async fn generate_text(&self, prompt: &str) -> Result<String, EngineError>;
}
