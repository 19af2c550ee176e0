use std::time::Duration;

use crate::constants::{HINT_FAULT_FALLBACK, HINT_TIMEOUT, NO_HINT_FALLBACK};
use crate::domain::Problem;
use crate::engine::traits::TextEngine;
use crate::prompt::build_hint_prompt;

/// Ask the engine for a short nudge on the current code. Best effort: an
/// empty response or any fault degrades to a fixed advisory string, never
/// an error.
pub async fn request_hint(engine: &dyn TextEngine, problem: &Problem, code: &str) -> String {
    let prompt = build_hint_prompt(problem, code);
    hint_within(engine, &prompt, HINT_TIMEOUT).await
}

async fn hint_within(engine: &dyn TextEngine, prompt: &str, ceiling: Duration) -> String {
    match tokio::time::timeout(ceiling, engine.generate_text(prompt)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text,
        Ok(Ok(_)) => NO_HINT_FALLBACK.to_string(),
        Ok(Err(e)) => {
            tracing::warn!("Hint generation failed: {}", e);
            HINT_FAULT_FALLBACK.to_string()
        }
        Err(_) => {
            tracing::warn!("Hint generation timed out after {:?}", ceiling);
            HINT_FAULT_FALLBACK.to_string()
        }
    }
}
