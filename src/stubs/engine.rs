use std::time::Duration;

use serde_json::{Value, json};

use crate::engine::traits::{EngineError, TextEngine};

/// Canned engine for wiring and tests: returns fixed responses after a
/// configurable delay.
#[derive(Debug, Clone)]
pub struct EngineStub {
    structured: Result<Value, EngineError>,
    text: Result<String, EngineError>,
    delay: Duration,
}

impl EngineStub {
    pub fn new(
        structured: Result<Value, EngineError>,
        text: Result<String, EngineError>,
        delay: Duration,
    ) -> Self {
        Self {
            structured,
            text,
            delay,
        }
    }

    /// Stub that accepts every submission and always has a hint ready.
    pub fn accepting(delay: Duration) -> Self {
        Self::new(
            Ok(json!({
                "status": "Accepted",
                "output": "All test cases passed.",
                "executionTime": "48ms",
                "memory": "13.1MB",
                "testCasesPassed": 3,
                "totalTestCases": 3
            })),
            Ok("Consider which data structure lets you look up a complement in constant time."
                .to_string()),
            delay,
        )
    }
}

#[async_trait::async_trait]
impl TextEngine for EngineStub {
    #[tracing::instrument]
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, EngineError> {
        tracing::debug!(
            "Start structured generation: prompt={:?}, schema={:?}",
            prompt,
            schema
        );
        tokio::time::sleep(self.delay).await;
        tracing::debug!("Structured generation result: {:?}", self.structured);

        self.structured.clone()
    }

    #[tracing::instrument]
    async fn generate_text(&self, prompt: &str) -> Result<String, EngineError> {
        tracing::debug!("Start text generation: prompt={:?}", prompt);
        tokio::time::sleep(self.delay).await;
        tracing::debug!("Text generation result: {:?}", self.text);

        self.text.clone()
    }
}
